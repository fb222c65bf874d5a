use super::*;

#[test]
fn default_is_one_cache_line_unbounded() {
    let config = LexConfig::default();
    assert_eq!(config.initial_capacity, DEFAULT_CAPACITY);
    assert_eq!(config.max_capacity, None);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn zero_capacity_rejected() {
    assert_eq!(LexConfig::new(0).validate(), Err(ConfigError::ZeroCapacity));
}

#[test]
fn capacity_above_limit_rejected() {
    let config = LexConfig::new(32).with_max_capacity(16);
    assert_eq!(
        config.validate(),
        Err(ConfigError::CapacityExceedsLimit {
            capacity: 32,
            limit: 16
        })
    );
}

#[test]
fn capacity_equal_to_limit_accepted() {
    let config = LexConfig::new(16).with_max_capacity(16);
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.max_capacity, Some(16));
}
