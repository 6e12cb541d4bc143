// [libs/domain/models/src/lib.rs]
//! =================================================================
//! APARATO: DOMAIN MODELS BARREL (V1.0)
//! RESPONSABILIDAD: EXPOSICION PUBLICA DE ENTIDADES COMPARTIDAS
//! =================================================================
//!
//! Single source of truth for the shapes that flow between the discovery
//! services, the workers and the persistence layer. Deliberately plain
//! data: no behaviour lives here beyond small constructors and the fixed
//! lookup tables named explicitly (map names, weapon categories,
//! NPC roster).

pub mod broker;
pub mod credential;
pub mod fight;
pub mod maps;
pub mod r#match;
pub mod match_document;
pub mod player;
pub mod stats;
pub mod summary;
pub mod telemetry_event;
pub mod tournament;
pub mod weapons;

pub use broker::*;
pub use credential::*;
pub use fight::*;
pub use maps::*;
pub use match_document::*;
pub use player::*;
pub use r#match::*;
pub use stats::*;
pub use summary::*;
pub use telemetry_event::*;
pub use tournament::*;
pub use weapons::*;
