pub mod create_property;
pub mod current_user;
pub mod delete_property;
pub mod get_property;
pub mod health;
pub mod initialize_payment;
pub mod list_properties;
pub mod login;
pub mod register;
pub mod request;
pub mod search_properties;
pub mod update_property;
pub mod verify_payment;
