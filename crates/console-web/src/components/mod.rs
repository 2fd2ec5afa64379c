//! Reusable dashboard components

pub mod delete_confirm_button;
pub mod error_banner;
pub mod export_menu;
pub mod filters;
pub mod loading;
pub mod mutation_modal;
pub mod pagination;
pub mod resource_page;

pub use delete_confirm_button::DeleteConfirmButton;
pub use error_banner::{ErrorBanner, NoticeBanner};
pub use export_menu::ExportMenu;
pub use filters::{FacetSelect, SearchBox};
pub use loading::Loading;
pub use mutation_modal::MutationModal;
pub use pagination::Pagination;
pub use resource_page::ResourcePage;
