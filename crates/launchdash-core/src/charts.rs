//! The pie and scatter charts the dashboard callbacks return.

use crate::aggregate::{outcome_counts, success_counts_by_site};
use crate::figure::{Axis, Figure, Legend, Title, Trace};
use crate::filter::{PayloadRange, SiteSelection};
use crate::record::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_PAYLOAD_MASS};
use crate::table::LaunchTable;

/// Pie of successful launches.
///
/// For every site: success count per site. For one site: the count of each
/// outcome class at that site.
pub fn success_pie_chart(table: &LaunchTable, selection: &SiteSelection) -> Figure {
    match selection {
        SiteSelection::All => {
            let (labels, values) = success_counts_by_site(table)
                .into_iter()
                .map(|(site, count)| (site, count as f64))
                .unzip();
            Figure::pie("Total Success Launches By Site", labels, values)
        }
        SiteSelection::Site(site) => {
            let (labels, values) = outcome_counts(table.for_site(selection))
                .into_iter()
                .map(|(class, count)| (class.to_string(), count as f64))
                .unzip();
            Figure::pie(
                format!("Total Success Launches For Site {site}"),
                labels,
                values,
            )
        }
    }
}

/// Scatter of payload mass against outcome, coloured by booster category.
pub fn payload_scatter_chart(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> Figure {
    let title = match selection {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for site {site}")
        }
    };

    let rows = table.matching(selection, range);
    tracing::debug!(
        site = %selection,
        low = range.low(),
        high = range.high(),
        rows = rows.len(),
        "Filtered scatter rows"
    );

    // One trace per category, in first-appearance order.
    let mut traces: Vec<Trace> = Vec::new();
    for record in rows {
        let category = &record.booster_version_category;
        let index = match traces
            .iter()
            .position(|t| matches!(t, Trace::Scatter { name, .. } if name == category))
        {
            Some(index) => index,
            None => {
                traces.push(Trace::Scatter {
                    name: category.clone(),
                    x: Vec::new(),
                    y: Vec::new(),
                    mode: "markers".to_string(),
                    text: Vec::new(),
                });
                traces.len() - 1
            }
        };
        if let Some(Trace::Scatter { x, y, text, .. }) = traces.get_mut(index) {
            x.push(record.payload_mass_kg);
            y.push(f64::from(record.outcome.class_value()));
            text.push(record.booster_version.clone());
        }
    }

    let mut figure = Figure::titled(title);
    figure.data = traces;
    figure.layout.xaxis = Some(Axis::titled(COL_PAYLOAD_MASS));
    figure.layout.yaxis = Some(Axis::titled(COL_CLASS));
    figure.layout.legend = Some(Legend {
        title: Title {
            text: COL_BOOSTER_CATEGORY.to_string(),
        },
    });
    figure
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::record::{LaunchOutcome, LaunchRecord};

    fn record(site: &str, ok: bool, payload: f64, category: &str) -> LaunchRecord {
        LaunchRecord {
            flight_number: 1,
            launch_site: site.to_string(),
            outcome: if ok {
                LaunchOutcome::Success
            } else {
                LaunchOutcome::Failure
            },
            payload_mass_kg: payload,
            booster_version: format!("F9 {category}"),
            booster_version_category: category.to_string(),
        }
    }

    fn table() -> LaunchTable {
        LaunchTable::from_records(vec![
            record("CCAFS LC-40", false, 0.0, "v1.0"),
            record("CCAFS LC-40", true, 2600.0, "v1.1"),
            record("KSC LC-39A", true, 5300.0, "FT"),
            record("KSC LC-39A", false, 3000.0, "FT"),
            record("CCAFS LC-40", true, 7400.0, "FT"),
            record("VAFB SLC-4E", true, 9600.0, "B4"),
        ])
        .unwrap()
    }

    #[test]
    fn test_pie_all_sites() {
        let fig = success_pie_chart(&table(), &SiteSelection::All);
        assert_eq!(fig.title(), "Total Success Launches By Site");
        match &fig.data[0] {
            Trace::Pie { labels, values } => {
                assert_eq!(labels, &["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
                assert_eq!(values, &[2.0, 1.0, 1.0]);
            }
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn test_pie_single_site() {
        let site = SiteSelection::Site("CCAFS LC-40".into());
        let fig = success_pie_chart(&table(), &site);
        assert_eq!(fig.title(), "Total Success Launches For Site CCAFS LC-40");
        match &fig.data[0] {
            Trace::Pie { labels, values } => {
                assert_eq!(labels, &["1", "0"]);
                assert_eq!(values, &[2.0, 1.0]);
            }
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn test_pie_unknown_site_is_empty() {
        let site = SiteSelection::Site("Boca Chica".into());
        let fig = success_pie_chart(&table(), &site);
        assert_eq!(fig.point_count(), 0);
    }

    #[test]
    fn test_scatter_all_sites_default_range() {
        let range = PayloadRange::new(2500.0, 7500.0).unwrap();
        let fig = payload_scatter_chart(&table(), &SiteSelection::All, &range);
        assert_eq!(
            fig.title(),
            "Correlation between Payload and Success for all Sites"
        );
        assert_eq!(fig.point_count(), 4);
        let names: Vec<&str> = fig
            .data
            .iter()
            .map(|t| match t {
                Trace::Scatter { name, .. } => name.as_str(),
                Trace::Pie { .. } => "",
            })
            .collect();
        assert_eq!(names, vec!["v1.1", "FT"]);
    }

    #[test]
    fn test_scatter_single_site_points() {
        let range = PayloadRange::new(0.0, 10000.0).unwrap();
        let site = SiteSelection::Site("KSC LC-39A".into());
        let fig = payload_scatter_chart(&table(), &site, &range);
        assert_eq!(
            fig.title(),
            "Correlation between Payload and Success for site KSC LC-39A"
        );
        match &fig.data[..] {
            [Trace::Scatter { x, y, mode, .. }] => {
                assert_eq!(x, &[5300.0, 3000.0]);
                assert_eq!(y, &[1.0, 0.0]);
                assert_eq!(mode, "markers");
            }
            other => panic!("expected one scatter trace, got {other:?}"),
        }
        let layout = fig.layout;
        assert_eq!(layout.xaxis.unwrap().title.text, "Payload Mass (kg)");
        assert_eq!(layout.yaxis.unwrap().title.text, "class");
    }

    #[test]
    fn test_scatter_empty_range_has_no_points() {
        let range = PayloadRange::new(100.0, 200.0).unwrap();
        let fig = payload_scatter_chart(&table(), &SiteSelection::All, &range);
        assert!(fig.data.is_empty());
        assert_eq!(fig.point_count(), 0);
    }
}
