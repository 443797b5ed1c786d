mod notification;

pub use notification::NotificationMessage;
