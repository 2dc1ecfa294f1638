use super::Config;

#[test]
fn test_empty_config_uses_defaults() {
    let cfg = Config::from_toml("");
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.file_extensions, vec!["md".to_string()]);
    assert!(cfg.highlight);
}

#[test]
fn test_partial_config_overrides() {
    let cfg = Config::from_toml("theme = \"base16-ocean.dark\"\ntoc_max_depth = 3\n");
    assert_eq!(cfg.theme, "base16-ocean.dark");
    assert_eq!(cfg.toc_max_depth, 3);
    assert_eq!(cfg.toc_min_depth, 1);

    let toc = cfg.toc_options();
    assert_eq!((toc.min_depth, toc.max_depth), (1, 3));
}

#[test]
fn test_invalid_config_falls_back() {
    let cfg = Config::from_toml("highlight = \"sometimes\"");
    assert_eq!(cfg, Config::default());
}
