pub mod process_payment;
pub mod send_notification;
pub mod validate_order;
