pub mod domain;
pub mod panel;
pub mod reference;

// re-export for cleaner imports
pub use self::domain::{Domain, DomainSpan};
pub use self::panel::ReferencePanel;
pub use self::reference::ReferenceEntry;
