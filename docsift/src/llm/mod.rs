mod provider;

pub use provider::RefinementProvider;
