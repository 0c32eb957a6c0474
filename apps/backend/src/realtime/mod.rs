pub mod broker;

pub use broker::{BroadcastBroker, EventEnvelope, NoopPublisher, UpdatePublisher};
