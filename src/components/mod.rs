//! UI Components
//!
//! Reusable Leptos components.

mod book_search_modal;
mod bulk_action_bar;
mod collection_tabs;
mod delete_confirm_button;
mod filter_bar;
mod item_form;
mod item_list;

pub use book_search_modal::BookSearchModal;
pub use bulk_action_bar::BulkActionBar;
pub use collection_tabs::CollectionTabs;
pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::FilterBar;
pub use item_form::ItemForm;
pub use item_list::ItemList;
