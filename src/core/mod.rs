pub mod attributes;
pub mod dom;
pub mod error;
pub mod extractor;
pub mod http;
pub mod metadata;
pub mod options;

pub use attributes::{reindex, Attributes};
pub use dom::{AttributeFilter, DomParser, Element, HtmlParser, SelectorSpec};
pub use error::{EssenceError, FetchError, Result};
pub use extractor::{Extractor, Provider, Registration};
pub use http::{HttpClient, ReqwestClient};
pub use metadata::Media;
pub use options::{prepare_url, HtmlBuilder, Options, UrlPreparer};
