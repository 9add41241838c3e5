mod channel;

pub use channel::{Callback, Channel, EventEmitter, EventObserver, SubscriptionId};
