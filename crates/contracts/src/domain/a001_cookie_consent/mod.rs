//! Cookie consent widget domain.
//!
//! - `category`: consent topics and their markup declarations
//! - `extractor`: markup + stored record -> seeded categories
//! - `record`: the persisted decision map
//! - `machine`: consent state machine and view model
//! - `projection`: view model -> declarative widget tree
//! - `tabs`: navigation/panel coordination
//! - `config`: widget configuration

pub mod category;
pub mod config;
pub mod extractor;
pub mod machine;
pub mod projection;
pub mod record;
pub mod tabs;

pub use category::{derive_id, Category, CategoryDeclaration, MarkupNode, SlotStrategy};
pub use config::{Backdrop, WidgetConfig, COOKIE_TAG};
pub use extractor::{duplicate_keys, extract_categories, validate_unique_keys};
pub use machine::{ConsentMachine, ConsentSaved, Phase, ViewModel};
pub use projection::{project, WidgetTree};
pub use record::{ConsentRecord, PersistPolicy, CONSENT_COOKIE_NAME};
pub use tabs::{HostContext, TabCoordinator};
