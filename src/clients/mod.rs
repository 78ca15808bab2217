pub mod macros;

pub mod cart_client;
pub mod catalog_client;
pub mod session_client;
pub mod toast_client;

pub use cart_client::CartClient;
pub use catalog_client::CatalogClient;
pub use session_client::SessionClient;
pub use toast_client::ToastClient;
