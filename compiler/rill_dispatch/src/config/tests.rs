use pretty_assertions::assert_eq;

use super::*;

#[test]
fn defaults() {
    let config = LinkerConfig::default();
    assert_eq!(config.mode, LinkMode::Adaptive);
    assert_eq!(config.concat_chars_per_arg, 5);
    assert_eq!(config.concat_max_arity, 10);
    assert_eq!(config.stack, StackBudget::default());
}

#[test]
fn builder_clamps_concat_arity() {
    assert_eq!(LinkerBuilder::new().concat_max_arity(40).build().concat_max_arity, 10);
    assert_eq!(LinkerBuilder::new().concat_max_arity(0).build().concat_max_arity, 2);
    assert_eq!(LinkerBuilder::new().concat_max_arity(6).build().concat_max_arity, 6);
}

#[test]
fn builder_sets_depth_and_mode() {
    let config = LinkerBuilder::new()
        .mode(LinkMode::GenericOnly)
        .max_link_depth(3)
        .build();
    assert_eq!(config.mode, LinkMode::GenericOnly);
    assert_eq!(config.stack.max_depth(), 3);
    assert!(!config.mode.specializes());
}

#[test]
fn lookup_overrides() {
    let config = LinkerConfig::from_lookup(|key| match key {
        LINK_MODE_VAR => Some("Generic".to_string()),
        LINK_DEPTH_VAR => Some(" 16 ".to_string()),
        _ => None,
    });
    assert_eq!(config.mode, LinkMode::GenericOnly);
    assert_eq!(config.stack.max_depth(), 16);
}

#[test]
fn bad_overrides_are_ignored() {
    let config = LinkerConfig::from_lookup(|key| match key {
        LINK_MODE_VAR => Some("turbo".to_string()),
        LINK_DEPTH_VAR => Some("-1".to_string()),
        _ => None,
    });
    assert_eq!(config, LinkerConfig::default());
}

#[test]
fn mode_parsing() {
    assert_eq!("adaptive".parse::<LinkMode>(), Ok(LinkMode::Adaptive));
    assert_eq!("generic-only".parse::<LinkMode>(), Ok(LinkMode::GenericOnly));
    assert!("fast".parse::<LinkMode>().is_err());
    assert_eq!(LinkMode::GenericOnly.to_string(), "generic");
}
