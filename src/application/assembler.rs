// Specification assembly - synthesis entry point for the wizard and the
// generate path's local post-processing
use crate::application::layout_packer::pack;
use crate::application::synthesizer::synthesize;
use crate::domain::selection::DataSelection;
use crate::domain::specification::{
    DashboardSpecification, Generator, SpecMetadata, ThemeRef,
};
use crate::domain::templates::{LayoutTemplate, ThemeTemplate};

/// Build a complete specification from the wizard's selections: synthesize
/// the chart placeholders, pack the grid, carry the selection and theme, and
/// record the chosen layout template in the metadata.
pub fn assemble(
    name: &str,
    description: &str,
    selection: &DataSelection,
    theme: Option<&ThemeTemplate>,
    layout: Option<&LayoutTemplate>,
) -> DashboardSpecification {
    let charts = synthesize(selection, layout);
    let cells = pack(&charts);

    let (data_source_id, table_name, data_mart_id) = match selection {
        DataSelection::Datasource {
            source_id,
            table_name,
        } => (Some(source_id.clone()), Some(table_name.clone()), None),
        DataSelection::Datamart { mart_id } => (None, None, Some(mart_id.clone())),
    };

    let metadata = SpecMetadata {
        layout_applied: layout.is_some(),
        layout_template_id: layout.map(|l| l.id.clone()),
        layout_template_name: layout.map(|l| l.name.clone()),
        generator: Generator::Wizard,
    };

    DashboardSpecification {
        title: name.to_string(),
        description: description.to_string(),
        theme: theme.map(ThemeRef::from_template).unwrap_or_else(ThemeRef::default_theme),
        data_source_id,
        table_name,
        data_mart_id,
        charts,
        layout: cells,
        filters: Vec::new(),
        metadata,
    }
}

/// Post-process a specification received from the generation collaborator.
/// Untrusted output may arrive with a missing, duplicated, or orphaned
/// layout; the grid is then rebuilt from the charts. A blank title falls
/// back to the previous specification's title.
pub fn normalize(
    mut spec: DashboardSpecification,
    previous: &DashboardSpecification,
) -> DashboardSpecification {
    if !spec.layout_aligned() {
        spec.layout = pack(&spec.charts);
    }
    if spec.title.trim().is_empty() {
        spec.title = previous.title.clone();
    }
    spec.metadata.generator = Generator::Generated;
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::templates::LayoutKind;
    use std::collections::HashSet;

    fn theme(name: &str) -> ThemeTemplate {
        ThemeTemplate {
            id: name.to_lowercase(),
            name: name.to_string(),
            colors: vec!["#123456".to_string()],
            font_family: "serif".to_string(),
            border_radius: "4px".to_string(),
        }
    }

    fn layout(kind: LayoutKind) -> LayoutTemplate {
        LayoutTemplate {
            id: "l1".to_string(),
            name: "KPI board".to_string(),
            layout_type: kind,
            description: String::new(),
        }
    }

    #[test]
    fn test_charts_and_layout_are_id_aligned() {
        let spec = assemble(
            "Sales",
            "",
            &DataSelection::datasource("pg1", "orders"),
            None,
            None,
        );
        assert!(spec.layout_aligned());
        assert_eq!(spec.charts.len(), spec.layout.len());
    }

    #[test]
    fn test_selection_fields_carry_over() {
        let spec = assemble(
            "Sales",
            "",
            &DataSelection::datasource("pg1", "orders"),
            None,
            None,
        );
        assert_eq!(spec.data_source_id.as_deref(), Some("pg1"));
        assert_eq!(spec.table_name.as_deref(), Some("orders"));
        assert!(spec.data_mart_id.is_none());

        let mart_spec = assemble("Sales", "", &DataSelection::datamart("sales_mart"), None, None);
        assert!(mart_spec.data_source_id.is_none());
        assert!(mart_spec.table_name.is_none());
        assert_eq!(mart_spec.data_mart_id.as_deref(), Some("sales_mart"));
    }

    #[test]
    fn test_theme_defaults_when_none_chosen() {
        let selection = DataSelection::datamart("sales_mart");
        let spec = assemble("Sales", "", &selection, None, None);
        assert_eq!(spec.theme.name, "default");

        let themed = assemble("Sales", "", &selection, Some(&theme("Ocean")), None);
        assert_eq!(themed.theme.name, "Ocean");
    }

    #[test]
    fn test_layout_template_recorded_in_metadata() {
        let selection = DataSelection::datasource("pg1", "orders");
        let plain = assemble("Sales", "", &selection, None, None);
        assert!(!plain.metadata.layout_applied);
        assert!(plain.metadata.layout_template_id.is_none());

        let templated = assemble(
            "Sales",
            "",
            &selection,
            None,
            Some(&layout(LayoutKind::KpiFocused)),
        );
        assert!(templated.metadata.layout_applied);
        assert_eq!(templated.metadata.layout_template_id.as_deref(), Some("l1"));
        assert_eq!(
            templated.metadata.layout_template_name.as_deref(),
            Some("KPI board")
        );
    }

    #[test]
    fn test_normalize_rebuilds_broken_layout() {
        let previous = assemble(
            "Sales",
            "",
            &DataSelection::datasource("pg1", "orders"),
            None,
            None,
        );
        let mut generated = previous.clone();
        generated.layout.truncate(2);
        assert!(!generated.layout_aligned());

        let normalized = normalize(generated, &previous);
        assert!(normalized.layout_aligned());
        assert_eq!(normalized.metadata.generator, Generator::Generated);
    }

    #[test]
    fn test_equal_cardinality_composition_change_is_invisible_to_diff() {
        // Both sets have six charts, so the count-based delta sees nothing.
        // Known behavior of count-only diffing, kept intentionally.
        use crate::domain::conversation::SpecDelta;

        let selection = DataSelection::datasource("pg1", "orders");
        let default_spec = assemble("Sales", "", &selection, None, None);
        let kpi_spec = assemble(
            "Sales",
            "",
            &selection,
            None,
            Some(&layout(LayoutKind::KpiFocused)),
        );
        assert_eq!(default_spec.charts.len(), kpi_spec.charts.len());
        let delta = SpecDelta::between(&default_spec, &kpi_spec);
        assert_eq!(delta.chart_count_change, 0);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_normalize_restores_blank_title() {
        let previous = assemble(
            "Sales",
            "",
            &DataSelection::datasource("pg1", "orders"),
            None,
            None,
        );
        let mut generated = previous.clone();
        generated.title = "  ".to_string();
        let normalized = normalize(generated, &previous);
        assert_eq!(normalized.title, "Sales");
    }

    mod packing_properties {
        use super::*;
        use proptest::prelude::*;

        fn selections() -> impl Strategy<Value = DataSelection> {
            prop_oneof![
                ("[a-z]{1,12}", "[a-z_]{1,16}").prop_map(|(source, table)| {
                    DataSelection::datasource(source, table)
                }),
                "[a-z_]{1,16}".prop_map(DataSelection::datamart),
            ]
        }

        fn layouts() -> impl Strategy<Value = Option<LayoutTemplate>> {
            prop_oneof![
                Just(None),
                prop_oneof![
                    Just(LayoutKind::KpiFocused),
                    Just(LayoutKind::Comparison),
                    Just(LayoutKind::Trend),
                    Just(LayoutKind::Other),
                ]
                .prop_map(|kind| Some(layout(kind))),
            ]
        }

        proptest! {
            // Every specification the assembler can produce has a
            // non-overlapping layout inside the 12-column grid, with cells
            // aligned one-to-one with charts.
            #[test]
            fn assembled_layout_never_overlaps(
                selection in selections(),
                layout in layouts(),
                name in "[A-Za-z ]{1,24}",
            ) {
                let spec = assemble(&name, "", &selection, None, layout.as_ref());
                prop_assert!(spec.layout_aligned());
                for cell in &spec.layout {
                    prop_assert!(cell.fits_grid());
                }
                for (i, a) in spec.layout.iter().enumerate() {
                    for b in &spec.layout[i + 1..] {
                        prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                    }
                }
                let ids: HashSet<&str> =
                    spec.charts.iter().map(|c| c.id.as_str()).collect();
                prop_assert_eq!(ids.len(), spec.charts.len());
            }
        }
    }
}
