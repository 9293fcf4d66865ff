//! # fincenter-intelligence
//!
//! Wires storage, the four intelligence engines, and observability into one
//! runtime, and exposes the surface the presentation layer calls:
//!
//! | Operation | Backed by |
//! |---|---|
//! | active clusters, acknowledge cluster | storage |
//! | ranked decisions | `fincenter-fusion` |
//! | patterns above a floor, refresh patterns | `fincenter-episodic` |
//! | recommendations, acknowledge recommendation | `fincenter-recommendations` |
//! | full refresh | episodic → correlation → recommendations |
//! | narrative answers, stress scenarios | [`narrative`], [`scenarios`] |

pub mod narrative;
pub mod runtime;
pub mod scenarios;

pub use narrative::{NarrativeAnswer, NarrativeContext};
pub use runtime::{IntelligenceRuntime, RefreshReport, RuntimeOptions, StorageMode};
pub use scenarios::{Scenario, ScenarioOrigin, ScenarioSet};
