//! Building the stand view models for a hall.

use std::collections::HashSet;

use anyhow::Result;
use tracing::{debug, warn};

use crate::models::{HallData, Stand};
use crate::services::exhibitors::exhibitor_info;
use crate::services::geometry::{booth_outline, CoordinatePolicy};

/// Builds the stands shown for one hall.
///
/// Elements are kept in data order. Elements without a label, structural
/// elements and elements without an outline are skipped; when two booths
/// share a label the first one wins.
///
/// # Errors
///
/// Returns an error only when `policy` is [`CoordinatePolicy::Fail`] and an
/// element has malformed coordinates.
pub fn build_stands(data: &HallData, policy: CoordinatePolicy) -> Result<Vec<Stand>> {
    let mut seen = HashSet::new();
    let mut stands = Vec::new();

    for element in &data.map_elements {
        let Some(points) = booth_outline(element, policy)? else {
            continue;
        };

        let Some(label) = element.label() else {
            debug!("Map element {} has no stand id or name, not shown", element.id);
            continue;
        };

        if !seen.insert(label.to_string()) {
            warn!("Duplicate stand label {label:?} (element {}), keeping the first", element.id);
            continue;
        }

        stands.push(Stand {
            label: label.to_string(),
            points,
            info: exhibitor_info(label, element.name.as_deref(), &data.companies),
        });
    }

    debug!("Built {} stands from {} map elements", stands.len(), data.map_elements.len());
    Ok(stands)
}
