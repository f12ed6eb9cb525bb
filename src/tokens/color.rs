//! Color conversion and alias resolution.

use futures::future::join_all;

use super::model::{ColorVariable, HexColor, Rgba, Variable, VariableValue};
use crate::plugin::VariableHost;

/// Maximum number of alias hops followed before giving up.
pub const MAX_ALIAS_HOPS: usize = 10;

/// Convert an RGB(A) color to a lowercase hex string.
///
/// Produces `#rrggbb`, or `#rrggbbaa` when alpha is present and below 1.0.
/// Channels are clamped to `0.0..=1.0` and rounded half up.
pub fn rgb_to_hex(color: &Rgba) -> String {
    let mut hex = format!(
        "#{}{}{}",
        channel_to_hex(color.r),
        channel_to_hex(color.g),
        channel_to_hex(color.b)
    );

    if let Some(alpha) = color.a.filter(|a| *a < 1.0) {
        hex.push_str(&channel_to_hex(alpha));
    }

    hex
}

fn channel_to_hex(value: f64) -> String {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    format!("{:02x}", (value * 255.0).round() as u8)
}

/// Resolve a variable value to a hex string, following aliases.
///
/// Each alias hop fetches the referenced variable and continues with its
/// first mode's value. Returns `None` when the chain exceeds
/// [`MAX_ALIAS_HOPS`], points at a missing variable, or ends in a non-color.
pub async fn resolve_color<H>(host: &H, value: &VariableValue) -> Option<String>
where
    H: VariableHost + ?Sized,
{
    let mut current = value.clone();
    let mut hops = 0;

    loop {
        match current {
            VariableValue::Color(color) => return Some(rgb_to_hex(&color)),
            VariableValue::Alias(alias) => {
                hops += 1;
                if hops > MAX_ALIAS_HOPS {
                    tracing::debug!(id = %alias.id, "Alias chain exceeded {} hops", MAX_ALIAS_HOPS);
                    return None;
                }

                let referenced = match host.fetch_variable(&alias.id).await {
                    Ok(Some(variable)) => variable,
                    Ok(None) => {
                        tracing::debug!(id = %alias.id, "Aliased variable not found");
                        return None;
                    }
                    Err(e) => {
                        tracing::warn!(id = %alias.id, "Failed to fetch aliased variable: {}", e);
                        return None;
                    }
                };

                current = referenced.first_value()?.clone();
            }
            VariableValue::Boolean(_) | VariableValue::Float(_) | VariableValue::Text(_) => {
                return None;
            }
        }
    }
}

/// Resolve every mode of `variable` into a [`ColorVariable`].
///
/// Modes resolve concurrently. A mode that fails is kept as `None` so the
/// other modes survive; the result is unresolved only when no mode resolves.
pub async fn format_color_variable<H>(host: &H, variable: &Variable) -> ColorVariable
where
    H: VariableHost + ?Sized,
{
    let modes = join_all(variable.values_by_mode.iter().map(|(mode, value)| async move {
        let hex = resolve_color(host, value).await;
        if hex.is_none() {
            tracing::debug!(name = %variable.name, mode = %mode, "Unresolved color value");
        }
        (mode.clone(), hex)
    }))
    .await;

    if modes.iter().all(|(_, hex)| hex.is_none()) {
        return ColorVariable::unresolved(&variable.name);
    }

    ColorVariable { name: variable.name.clone(), hex_color: HexColor::Modes(modes) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{MemoryHost, VariableStore};
    use crate::tokens::render::{render_export, ExportSection, OutputFormat, RenderOptions};

    fn color_value(r: f64, g: f64, b: f64) -> VariableValue {
        VariableValue::Color(Rgba::rgb(r, g, b))
    }

    /// Build a store where `v0 -> v1 -> ... -> v{len}` and `v{len}` is red.
    fn alias_chain(len: usize) -> MemoryHost {
        let mut variables = Vec::new();
        for i in 0..len {
            variables.push(Variable::color(
                format!("v{i}"),
                format!("step/{i}"),
                vec![("m".to_string(), VariableValue::alias(format!("v{}", i + 1)))],
            ));
        }
        variables.push(Variable::color(
            format!("v{len}"),
            "base/red",
            vec![("m".to_string(), color_value(1.0, 0.0, 0.0))],
        ));

        MemoryHost::new(VariableStore { collections: Vec::new(), variables })
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(&Rgba::rgb(1.0, 0.0, 0.0)), "#ff0000");
        assert_eq!(rgb_to_hex(&Rgba::rgb(0.0, 0.4, 1.0)), "#0066ff");
        assert_eq!(rgb_to_hex(&Rgba::rgb(0.0, 0.0, 0.0)), "#000000");
    }

    #[test]
    fn test_rgb_to_hex_alpha_rounds_half_up() {
        assert_eq!(rgb_to_hex(&Rgba::rgba(0.0, 0.0, 0.0, 0.5)), "#00000080");
    }

    #[test]
    fn test_rgb_to_hex_opaque_alpha_is_omitted() {
        assert_eq!(rgb_to_hex(&Rgba::rgba(1.0, 1.0, 1.0, 1.0)), "#ffffff");
    }

    #[test]
    fn test_rgb_to_hex_clamps_out_of_range() {
        assert_eq!(rgb_to_hex(&Rgba::rgb(2.0, -1.0, f64::NAN)), "#ff0000");
    }

    #[test]
    fn test_rgb_to_hex_shape() {
        for step in 0..=20_u8 {
            let v = f64::from(step) / 20.0;
            let opaque = rgb_to_hex(&Rgba::rgb(v, 1.0 - v, v / 2.0));
            assert_eq!(opaque.len(), 7);
            assert!(opaque[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

            let translucent = rgb_to_hex(&Rgba::rgba(v, v, v, 0.99));
            assert_eq!(translucent.len(), 9);
        }
    }

    #[tokio::test]
    async fn test_resolve_direct_color() {
        let host = MemoryHost::new(VariableStore::default());
        let hex = resolve_color(&host, &color_value(1.0, 0.0, 0.0)).await;
        assert_eq!(hex.as_deref(), Some("#ff0000"));
    }

    #[tokio::test]
    async fn test_resolve_alias_chain_within_limit() {
        let host = alias_chain(3);
        let hex = resolve_color(&host, &VariableValue::alias("v0")).await;
        assert_eq!(hex.as_deref(), Some("#ff0000"));
    }

    #[tokio::test]
    async fn test_resolve_alias_chain_at_limit() {
        // Reaching the color takes exactly MAX_ALIAS_HOPS fetches
        let host = alias_chain(MAX_ALIAS_HOPS - 1);
        let hex = resolve_color(&host, &VariableValue::alias("v0")).await;
        assert!(hex.is_some());

        let host = alias_chain(MAX_ALIAS_HOPS);
        let hex = resolve_color(&host, &VariableValue::alias("v0")).await;
        assert_eq!(hex, None);
    }

    #[tokio::test]
    async fn test_resolve_cycle_terminates() {
        let host = MemoryHost::new(VariableStore {
            collections: Vec::new(),
            variables: vec![
                Variable::color("a", "a", vec![("m".to_string(), VariableValue::alias("b"))]),
                Variable::color("b", "b", vec![("m".to_string(), VariableValue::alias("a"))]),
            ],
        });

        assert_eq!(resolve_color(&host, &VariableValue::alias("a")).await, None);
    }

    #[tokio::test]
    async fn test_resolve_missing_variable() {
        let host = MemoryHost::new(VariableStore::default());
        assert_eq!(resolve_color(&host, &VariableValue::alias("nope")).await, None);
    }

    #[tokio::test]
    async fn test_resolve_host_failure_is_unresolved() {
        let host = alias_chain(1).failing_on("v1");
        assert_eq!(resolve_color(&host, &VariableValue::alias("v0")).await, None);
    }

    #[tokio::test]
    async fn test_resolve_alias_takes_first_mode_of_target() {
        let host = MemoryHost::new(VariableStore {
            collections: Vec::new(),
            variables: vec![Variable::color(
                "v",
                "palette/accent",
                vec![
                    ("a".to_string(), color_value(1.0, 0.0, 0.0)),
                    ("b".to_string(), color_value(0.0, 0.0, 1.0)),
                ],
            )],
        });

        let hex = resolve_color(&host, &VariableValue::alias("v")).await;
        assert_eq!(hex.as_deref(), Some("#ff0000"));
    }

    #[tokio::test]
    async fn test_resolve_alias_to_variable_without_modes() {
        let host = MemoryHost::new(VariableStore {
            collections: Vec::new(),
            variables: vec![Variable::color("v", "palette/empty", Vec::new())],
        });

        assert_eq!(resolve_color(&host, &VariableValue::alias("v")).await, None);
    }

    #[tokio::test]
    async fn test_resolve_non_color_terminal() {
        let host = MemoryHost::new(VariableStore::default());
        assert_eq!(resolve_color(&host, &VariableValue::Float(2.0)).await, None);
    }

    #[tokio::test]
    async fn test_format_color_variable_modes() {
        let host = alias_chain(1);
        let variable = Variable::color(
            "x",
            "Surface/Primary",
            vec![
                ("light".to_string(), color_value(1.0, 1.0, 1.0)),
                ("dark".to_string(), VariableValue::alias("v0")),
            ],
        );

        let formatted = format_color_variable(&host, &variable).await;
        assert_eq!(formatted.name, "Surface/Primary");
        assert_eq!(
            formatted.hex_color,
            HexColor::Modes(vec![
                ("light".to_string(), Some("#ffffff".to_string())),
                ("dark".to_string(), Some("#ff0000".to_string())),
            ])
        );
    }

    #[tokio::test]
    async fn test_format_color_variable_keeps_resolved_modes() {
        let host = MemoryHost::new(VariableStore::default());
        let variable = Variable::color(
            "x",
            "bg",
            vec![
                ("light".to_string(), color_value(1.0, 1.0, 1.0)),
                ("dark".to_string(), VariableValue::alias("gone")),
            ],
        );

        let formatted = format_color_variable(&host, &variable).await;
        assert_eq!(
            formatted.hex_color,
            HexColor::Modes(vec![
                ("light".to_string(), Some("#ffffff".to_string())),
                ("dark".to_string(), None),
            ])
        );
        assert_eq!(formatted.primary_hex(), Some("#ffffff"));

        let section = ExportSection { collection: "Theme".to_string(), variables: vec![formatted] };
        let scss = render_export(&[section], OutputFormat::Scss, &RenderOptions::default()).unwrap();
        assert_eq!(scss, "/* Theme */\n$bg: #ffffff;");
    }

    #[tokio::test]
    async fn test_format_color_variable_first_mode_failure_renders_unresolved() {
        let host = MemoryHost::new(VariableStore::default());
        let variable = Variable::color(
            "x",
            "accent",
            vec![
                ("light".to_string(), VariableValue::alias("missing")),
                ("dark".to_string(), color_value(0.0, 0.0, 0.0)),
            ],
        );

        let formatted = format_color_variable(&host, &variable).await;
        assert_eq!(formatted.primary_hex(), None);
        assert!(matches!(formatted.hex_color, HexColor::Modes(_)));
    }

    #[tokio::test]
    async fn test_format_color_variable_all_modes_failing_is_unresolved() {
        let host = MemoryHost::new(VariableStore::default());
        let variable = Variable::color(
            "x",
            "accent",
            vec![
                ("light".to_string(), VariableValue::alias("missing")),
                ("dark".to_string(), VariableValue::Text("blue".to_string())),
            ],
        );

        let formatted = format_color_variable(&host, &variable).await;
        assert_eq!(formatted.hex_color, HexColor::Unresolved);
    }

    #[tokio::test]
    async fn test_format_color_variable_without_modes() {
        let host = MemoryHost::new(VariableStore::default());
        let variable = Variable::color("x", "empty", Vec::new());
        assert_eq!(format_color_variable(&host, &variable).await.hex_color, HexColor::Unresolved);
    }
}
