pub mod busy;
pub mod error;
pub mod logging;
pub mod models;
pub mod templates;

pub use busy::{BusyFlag, BusyGuard};
pub use error::{ClassifiedError, DocumentError, ErrorKind};
pub use logging::{init, init_default, init_from_args};
pub use templates::{SampleCategory, TemplateProvider};
