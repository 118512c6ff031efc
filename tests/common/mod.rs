pub(crate) mod failing_bucket;

pub(crate) mod fixtures;

pub(crate) mod logging;
