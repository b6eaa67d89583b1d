pub mod clock;
pub mod http_client;
pub mod url;

pub use clock::{Clock, SystemClock};
pub use http_client::{HttpClient, StandardHttpClient};
pub use url::UrlUtils;
