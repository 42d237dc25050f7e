mod bundle;

pub use bundle::*;
