use std::collections::HashMap;

/// Built-in balance presets keyed by name. Values are raw JSON or YAML text.
pub fn builtin_balances() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "standard",
            include_str!("../content/balance/standard.json"),
        ),
        ("hard", include_str!("../content/balance/hard.yaml")),
    ])
}
