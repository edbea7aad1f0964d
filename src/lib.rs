//! # zdd-rs: families of sets as Zero-Suppressed Decision Diagrams
//!
//! A library for manipulating **families of finite sets** over a growing
//! universe of integer elements `1, 2, 3, ...`, represented as ZDDs.
//!
//! ## Key Features
//!
//! - **Manager-Centric**: every family is a [`ZddId`] handle owned by a [`ZddManager`];
//!   hash consing makes handle equality family equality.
//! - **Set Algebra**: `union`, `intersection`, `difference`, `join`, `change`, `restrict`.
//! - **Reductions**: minimal and maximal members, minimal hitting sets (transversals).
//! - **Containment Filters**: `nonsubsets` and `nonsupersets`.
//! - **Counting and Selection**: exact counts as [`BigUint`], a maximum-weight member,
//!   and uniform random members drawn with a seeded [`Ran3`] generator.
//!
//! ## Quick Start
//!
//! ```rust
//! use num_bigint::BigUint;
//! use zdd_rs::zdd::ZddManager;
//!
//! let mgr = ZddManager::new();
//! mgr.register_upto(4).unwrap();
//!
//! // Edges of the path 1 - 2 - 3 - 4.
//! let edges = [[1u32, 2], [2, 3], [3, 4]]
//!     .into_iter()
//!     .fold(mgr.zero(), |acc, e| mgr.union(acc, mgr.singleton(e)));
//!
//! // Minimal vertex covers.
//! let covers = mgr.hitting(edges);
//! assert_eq!(mgr.to_bracket_string(covers), "{{1,3},{2,3},{2,4}}");
//! assert_eq!(mgr.count(covers), BigUint::from(3u32));
//!
//! // The cheapest cover under unit costs is the one with the fewest vertices.
//! let best = mgr.best_member(covers, &[0, -1, -1, -1, -1]).unwrap();
//! assert_eq!(best.score, -2);
//! ```
//!
//! ## Variable Ordering
//!
//! Element `i` is always tested before element `i + 1`, so registering a new
//! element never disturbs existing diagrams. Elements are registered on first use,
//! or explicitly with [`ZddManager::register_upto`].
//!
//! ## Modules
//!
//! - [`mod@zdd`]: the manager, universe registry and base set algebra
//! - [`mod@reduce`]: minimal, maximal and hitting sets
//! - [`mod@filter`]: `nonsubsets`, `nonsupersets`, `zuniq`
//! - [`mod@optimize`]: maximum-weight member
//! - [`mod@count`]: exact member counting
//! - [`mod@random`]: uniform sampling
//! - [`mod@iter`]: enumeration and printing
//!
//! [`ZddManager`]: crate::zdd::ZddManager
//! [`ZddId`]: crate::reference::ZddId
//! [`Ran3`]: crate::random::Ran3
//! [`BigUint`]: num_bigint::BigUint

pub mod cache;
pub mod config;
pub mod count;
pub mod error;
pub mod filter;
pub mod iter;
pub mod node;
pub mod optimize;
pub mod random;
pub mod reduce;
pub mod reference;
pub mod subtable;
pub mod topo;
pub mod types;
pub mod zdd;
