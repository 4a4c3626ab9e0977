#![no_main]

use glasstrap_widget::WidgetConfig;
use libfuzzer_sys::fuzz_target;

/// A config the loaders accept must survive being written back out.
fn check_round_trip(config: &WidgetConfig) {
    let json = serde_json::to_string(config).expect("accepted config serializes to JSON");
    let reparsed = WidgetConfig::from_json_str(&json).expect("serialized JSON reloads");
    assert_eq!(&reparsed, config, "JSON round trip changed the config");

    // TOML integers are i64; larger millisecond values cannot be written.
    if let Ok(text) = toml::to_string(config) {
        let reparsed = WidgetConfig::from_toml_str(&text).expect("serialized TOML reloads");
        assert_eq!(&reparsed, config, "TOML round trip changed the config");
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = WidgetConfig::from_toml_str(text) {
        check_round_trip(&config);
    }
    if let Ok(config) = WidgetConfig::from_json_str(text) {
        check_round_trip(&config);
    }
});
