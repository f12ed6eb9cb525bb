//! Collection discovery and export orchestration.
//!
//! Host calls for independent ids are issued together and joined before use.
//! A failed host call is logged and treated as "not found"; nothing here
//! retries.

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::color::format_color_variable;
use super::model::{Collection, Variable};
use super::render::{render_export, ExportSection, OutputFormat, RenderOptions};
use crate::plugin::{HostResult, VariableHost};

/// A collection as shown in the UI selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
}

impl From<&Collection> for CollectionSummary {
    fn from(collection: &Collection) -> Self {
        Self { id: collection.id.clone(), name: collection.name.clone() }
    }
}

/// Fetch the given variables and keep the color-typed ones, in id order.
pub async fn color_variables<H>(host: &H, variable_ids: &[String]) -> Vec<Variable>
where
    H: VariableHost + ?Sized,
{
    let fetched = join_all(variable_ids.iter().map(|id| host.fetch_variable(id))).await;

    fetched
        .into_iter()
        .zip(variable_ids)
        .filter_map(|(result, id)| match result {
            Ok(variable) => variable,
            Err(e) => {
                tracing::warn!(id = %id, "Failed to fetch variable: {}", e);
                None
            }
        })
        .filter(Variable::is_color)
        .collect()
}

/// List the collections that contain at least one color variable.
///
/// If the host cannot list collections the result is empty.
pub async fn discover_collections<H>(host: &H) -> Vec<CollectionSummary>
where
    H: VariableHost + ?Sized,
{
    let collections = match host.fetch_collections().await {
        Ok(collections) => collections,
        Err(e) => {
            tracing::error!("Failed to list variable collections: {}", e);
            return Vec::new();
        }
    };

    let checks = join_all(collections.iter().map(|collection| async move {
        !color_variables(host, &collection.variable_ids).await.is_empty()
    }))
    .await;

    let summaries: Vec<CollectionSummary> = collections
        .iter()
        .zip(checks)
        .filter(|(_, has_colors)| *has_colors)
        .map(|(collection, _)| CollectionSummary::from(collection))
        .collect();

    tracing::debug!(
        total = collections.len(),
        with_colors = summaries.len(),
        "Discovered color collections"
    );
    summaries
}

/// Fetch and resolve the color variables of each requested collection.
///
/// Unknown or failing collection ids are skipped; the remaining sections
/// keep the requested order.
pub async fn collect_sections<H>(host: &H, collection_ids: &[String]) -> Vec<ExportSection>
where
    H: VariableHost + ?Sized,
{
    let fetched = join_all(collection_ids.iter().map(|id| host.fetch_collection(id))).await;

    let collections: Vec<Collection> = fetched
        .into_iter()
        .zip(collection_ids)
        .filter_map(|(result, id)| match result {
            Ok(Some(collection)) => Some(collection),
            Ok(None) => {
                tracing::debug!(id = %id, "Skipping unknown collection");
                None
            }
            Err(e) => {
                tracing::warn!(id = %id, "Failed to fetch collection: {}", e);
                None
            }
        })
        .collect();

    join_all(collections.into_iter().map(|collection| async move {
        let variables = color_variables(host, &collection.variable_ids).await;
        let formatted =
            join_all(variables.iter().map(|variable| format_color_variable(host, variable))).await;
        ExportSection { collection: collection.name, variables: formatted }
    }))
    .await
}

/// Export the requested collections as text in `format`.
pub async fn export_collections<H>(
    host: &H,
    collection_ids: &[String],
    format: OutputFormat,
    options: &RenderOptions,
) -> HostResult<String>
where
    H: VariableHost + ?Sized,
{
    let sections = collect_sections(host, collection_ids).await;
    tracing::debug!(sections = sections.len(), format = %format, "Rendering export");
    Ok(render_export(&sections, format, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{MemoryHost, VariableStore};
    use crate::tokens::model::{ResolvedType, Rgba, VariableValue};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn store() -> VariableStore {
        VariableStore {
            collections: vec![
                Collection::new("c-colors", "Colors", ids(&["red", "spacing", "link"])),
                Collection::new("c-spacing", "Spacing", ids(&["spacing"])),
                Collection::new("c-empty", "Empty", Vec::new()),
            ],
            variables: vec![
                Variable::color(
                    "red",
                    "Red/500",
                    vec![("m".to_string(), VariableValue::Color(Rgba::rgb(1.0, 0.0, 0.0)))],
                ),
                Variable {
                    id: "spacing".to_string(),
                    name: "Spacing/4".to_string(),
                    resolved_type: ResolvedType::Float,
                    values_by_mode: vec![("m".to_string(), VariableValue::Float(16.0))],
                },
                Variable::color(
                    "link",
                    "Link",
                    vec![("m".to_string(), VariableValue::alias("red"))],
                ),
            ],
        }
    }

    #[tokio::test]
    async fn test_color_variables_filters_and_keeps_order() {
        let host = MemoryHost::new(store());
        let variables = color_variables(&host, &ids(&["link", "spacing", "missing", "red"])).await;

        let names: Vec<_> = variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Link", "Red/500"]);
    }

    #[tokio::test]
    async fn test_color_variables_skips_failures() {
        let host = MemoryHost::new(store()).failing_on("red");
        let variables = color_variables(&host, &ids(&["red", "link"])).await;
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].id, "link");
    }

    #[tokio::test]
    async fn test_discover_filters_non_color_collections() {
        let host = MemoryHost::new(store());
        let collections = discover_collections(&host).await;

        assert_eq!(
            collections,
            vec![CollectionSummary { id: "c-colors".to_string(), name: "Colors".to_string() }]
        );
    }

    #[tokio::test]
    async fn test_discover_listing_failure_is_empty() {
        let host = MemoryHost::new(store()).failing_listing();
        assert!(discover_collections(&host).await.is_empty());
    }

    #[tokio::test]
    async fn test_collect_sections_skips_unknown_ids() {
        let host = MemoryHost::new(store());
        let sections = collect_sections(&host, &ids(&["nope", "c-colors", "c-spacing"])).await;

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].collection, "Colors");
        assert_eq!(sections[0].variables.len(), 2);
        assert_eq!(sections[0].variables[1].primary_hex(), Some("#ff0000"));
        assert_eq!(sections[1].collection, "Spacing");
        assert!(sections[1].variables.is_empty());
    }

    #[tokio::test]
    async fn test_export_css() {
        let host = MemoryHost::new(store());
        let output = export_collections(
            &host,
            &ids(&["c-colors"]),
            OutputFormat::Css,
            &RenderOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(output, "/* Colors */\n:root {\n--red-500: #ff0000;\n--link: #ff0000;\n}");
    }

    #[tokio::test]
    async fn test_export_json() {
        let host = MemoryHost::new(store());
        let output = export_collections(
            &host,
            &ids(&["c-colors"]),
            OutputFormat::Json,
            &RenderOptions::default(),
        )
        .await
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["Colors"]["red-500"], "#ff0000");
        assert_eq!(parsed["Colors"]["link"], "#ff0000");
    }
}
