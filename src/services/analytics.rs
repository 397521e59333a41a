//! Analytics service
//!
//! Classifies each equipment's maintenance trajectory and aggregates
//! organization-wide and per-department statistics. The classification and
//! aggregation functions are pure and total: unknown state labels normalize
//! to optimal, missing dates fall back to the evaluation day, and nothing in
//! here returns an error for malformed data.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;

use crate::{
    api::analytics::{AnalyticsResponse, DepartmentStateStats, StateDistribution, TrajectorySummary},
    config::DEPARTMENT_HIERARCHY,
    error::AppResult,
    models::{
        department::Department, enums::EquipmentState, equipment::Equipment,
        maintenance::MaintenanceEvent,
    },
    repository::Repository,
};

/// An improving repair within this many days of the evaluation instant
/// counts the equipment as improved regardless of later history.
pub const RECENT_IMPROVE_WINDOW_DAYS: i64 = 14;

/// Trajectory of one equipment's maintenance history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trajectory {
    Improved,
    Worsened,
    Unchanged,
}

static HIERARCHY_POSITION: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    DEPARTMENT_HIERARCHY
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i))
        .collect()
});

/// Sort key placing hierarchy members first (in list order), then everything
/// else alphabetically
fn department_sort_key(name: &str) -> (usize, String) {
    (
        HIERARCHY_POSITION.get(name).copied().unwrap_or(usize::MAX),
        name.to_lowercase(),
    )
}

/// Classify one equipment's trajectory from its maintenance events.
///
/// Events without a resulting state are informational and ignored; `None`
/// means the equipment has no state-bearing history and stays out of the
/// improved/worsened tally. Events are ordered by date (missing date counts
/// as `today`) with the row id breaking ties deterministically.
pub fn classify_trajectory<'a>(
    events: impl IntoIterator<Item = &'a MaintenanceEvent>,
    today: NaiveDate,
) -> Option<Trajectory> {
    let mut sequence: Vec<(NaiveDate, i32, EquipmentState)> = events
        .into_iter()
        .filter_map(|m| {
            let label = m.resulting_state.as_deref().unwrap_or("").trim();
            if label.is_empty() {
                return None;
            }
            Some((
                m.event_date.unwrap_or(today),
                m.id,
                EquipmentState::normalize(label),
            ))
        })
        .collect();
    if sequence.is_empty() {
        return None;
    }
    sequence.sort_by_key(|&(date, id, _)| (date, id));

    let first = sequence.first().map(|&(_, _, s)| s)?;
    let last = sequence.last().map(|&(_, _, s)| s)?;

    let mut prev: Option<EquipmentState> = None;
    let mut worsened = false;
    let mut had_optimal = false;
    let mut had_worse = false;
    let mut last_improve_date: Option<NaiveDate> = None;

    for &(date, _, state) in &sequence {
        if state == EquipmentState::Optimal {
            had_optimal = true;
        } else {
            had_worse = true;
        }
        if let Some(prev_state) = prev {
            if prev_state != EquipmentState::Optimal && state == EquipmentState::Optimal {
                last_improve_date = Some(date);
            }
            if prev_state == EquipmentState::Optimal && state != EquipmentState::Optimal {
                worsened = true;
            }
        }
        prev = Some(state);
    }

    // A recent repair counts as a win even if older history degraded
    if let Some(improved_on) = last_improve_date {
        if (today - improved_on).num_days() <= RECENT_IMPROVE_WINDOW_DAYS {
            return Some(Trajectory::Improved);
        }
    }

    if last.rank() < first.rank() || worsened || (had_worse && !had_optimal) {
        return Some(Trajectory::Worsened);
    }
    Some(Trajectory::Unchanged)
}

fn distribution_of<'a>(equipment: impl IntoIterator<Item = &'a Equipment>) -> StateDistribution {
    let mut dist = StateDistribution::default();
    for e in equipment {
        match EquipmentState::normalize(&e.state) {
            EquipmentState::Optimal => dist.optimal += 1,
            EquipmentState::Defective => dist.defective += 1,
            EquipmentState::Inoperative => dist.inoperative += 1,
        }
    }
    dist
}

/// Organization-wide distribution of current equipment states
pub fn state_distribution(equipment: &[Equipment]) -> StateDistribution {
    distribution_of(equipment)
}

/// Organization-wide trajectory summary.
///
/// `unchanged` is derived as the remainder over the whole roster, so
/// equipment with no maintenance history is implicitly unchanged.
pub fn summarize_trajectories(
    equipment: &[Equipment],
    events: &[MaintenanceEvent],
    today: NaiveDate,
) -> TrajectorySummary {
    let mut by_equipment: HashMap<i32, Vec<&MaintenanceEvent>> = HashMap::new();
    for m in events {
        by_equipment.entry(m.equipment_id).or_default().push(m);
    }

    let mut improved = 0i64;
    let mut worsened = 0i64;
    for eq in equipment {
        if let Some(history) = by_equipment.get(&eq.id) {
            match classify_trajectory(history.iter().copied(), today) {
                Some(Trajectory::Improved) => improved += 1,
                Some(Trajectory::Worsened) => worsened += 1,
                _ => {}
            }
        }
    }

    let unchanged = (equipment.len() as i64 - improved - worsened).max(0);
    TrajectorySummary {
        improved,
        unchanged,
        worsened,
    }
}

/// Per-department state distributions, ordered by the organizational
/// hierarchy with unlisted departments appended alphabetically. Unassigned
/// equipment and departments without equipment are omitted.
pub fn department_breakdown(
    departments: &[Department],
    equipment: &[Equipment],
) -> Vec<DepartmentStateStats> {
    let mut by_department: HashMap<i32, Vec<&Equipment>> = HashMap::new();
    for e in equipment {
        if let Some(dep) = e.department_id {
            by_department.entry(dep).or_default().push(e);
        }
    }

    let mut ordered: Vec<&Department> = departments.iter().collect();
    ordered.sort_by_key(|d| department_sort_key(&d.name));

    ordered
        .into_iter()
        .filter_map(|d| {
            let owned = by_department.get(&d.id)?;
            Some(DepartmentStateStats {
                department_id: d.id,
                department_name: d.name.clone(),
                states: distribution_of(owned.iter().copied()),
            })
        })
        .collect()
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Build the dashboard payload from the full roster and history
    pub async fn overview(&self) -> AppResult<AnalyticsResponse> {
        let equipment = self.repository.equipment.list().await?;
        let events = self.repository.maintenance.list().await?;
        let departments = self.repository.departments.list().await?;
        let today = Utc::now().date_naive();

        Ok(AnalyticsResponse {
            states: state_distribution(&equipment),
            trajectories: summarize_trajectories(&equipment, &events, today),
            departments: department_breakdown(&departments, &equipment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    fn equipment(id: i32, state: &str, department_id: Option<i32>) -> Equipment {
        Equipment {
            id,
            internal_code: format!("EQ-{:03}", id),
            description: "Workstation".to_string(),
            brand: None,
            model: None,
            serial_number: None,
            location: None,
            state: state.to_string(),
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            department_id,
        }
    }

    fn event(id: i32, equipment_id: i32, date: NaiveDate, state: &str) -> MaintenanceEvent {
        MaintenanceEvent {
            id,
            equipment_id,
            event_date: Some(date),
            description: "Service".to_string(),
            resulting_state: if state.is_empty() {
                None
            } else {
                Some(state.to_string())
            },
        }
    }

    fn department(id: i32, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
            active: true,
        }
    }

    #[test]
    fn recent_improve_overrides_everything() {
        let events = vec![
            event(1, 1, days_ago(30), "defective"),
            event(2, 1, days_ago(10), "optimal"),
        ];
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Improved)
        );
    }

    #[test]
    fn improve_on_window_boundary_still_counts() {
        let events = vec![
            event(1, 1, days_ago(40), "inoperative"),
            event(2, 1, days_ago(14), "optimal"),
        ];
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Improved)
        );
    }

    #[test]
    fn stale_improve_falls_back_to_ranked_rule() {
        // The repair is older than the window, the later relapse decides
        let events = vec![
            event(1, 1, days_ago(40), "defective"),
            event(2, 1, days_ago(20), "optimal"),
            event(3, 1, days_ago(5), "defective"),
        ];
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Worsened)
        );
    }

    #[test]
    fn stale_improve_does_not_mask_old_worsening() {
        let events = vec![
            event(1, 1, days_ago(60), "optimal"),
            event(2, 1, days_ago(50), "defective"),
            event(3, 1, days_ago(40), "optimal"),
        ];
        // The optimal→defective transition decides once the repair is stale
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Worsened)
        );
    }

    #[test]
    fn unknown_state_normalizes_to_optimal() {
        let events = vec![
            event(1, 1, days_ago(20), "unknown_value"),
            event(2, 1, days_ago(10), "defective"),
        ];
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Worsened)
        );
    }

    #[test]
    fn never_optimal_history_counts_as_worsened() {
        let events = vec![event(1, 1, days_ago(10), "defective")];
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Worsened)
        );
    }

    #[test]
    fn optimal_only_history_is_unchanged() {
        let events = vec![
            event(1, 1, days_ago(20), "optimal"),
            event(2, 1, days_ago(10), "optimal"),
        ];
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Unchanged)
        );
    }

    #[test]
    fn informational_events_are_ignored() {
        let events = vec![event(1, 1, days_ago(10), "")];
        assert_eq!(classify_trajectory(&events, today()), None);
    }

    #[test]
    fn missing_date_counts_as_today() {
        let mut relapse = event(2, 1, days_ago(0), "optimal");
        relapse.event_date = None;
        let events = vec![event(1, 1, days_ago(30), "inoperative"), relapse];
        // The undated repair sorts last (as today) and is trivially recent
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Improved)
        );
    }

    #[test]
    fn same_date_events_order_by_id() {
        let d = days_ago(30);
        let events = vec![event(2, 1, d, "defective"), event(1, 1, d, "optimal")];
        // id 1 (optimal) sorts first, id 2 (defective) is the relapse
        assert_eq!(
            classify_trajectory(&events, today()),
            Some(Trajectory::Worsened)
        );
    }

    #[test]
    fn classification_is_pure() {
        let events = vec![
            event(1, 1, days_ago(30), "defective"),
            event(2, 1, days_ago(10), "optimal"),
        ];
        let first = classify_trajectory(&events, today());
        let second = classify_trajectory(&events, today());
        assert_eq!(first, second);
    }

    #[test]
    fn unchanged_is_the_remainder_over_the_whole_roster() {
        let roster = vec![
            equipment(1, "optimal", None),
            equipment(2, "defective", None),
            equipment(3, "optimal", None),
        ];
        let events = vec![
            // equipment 1: recent repair
            event(1, 1, days_ago(20), "defective"),
            event(2, 1, days_ago(5), "optimal"),
            // equipment 2: relapse outside the window
            event(3, 2, days_ago(60), "optimal"),
            event(4, 2, days_ago(40), "defective"),
            // equipment 3: no history at all
        ];
        let summary = summarize_trajectories(&roster, &events, today());
        assert_eq!(summary.improved, 1);
        assert_eq!(summary.worsened, 1);
        assert_eq!(summary.unchanged, 1);
    }

    #[test]
    fn distribution_defaults_unknown_current_state_to_optimal() {
        let roster = vec![
            equipment(1, "optimal", None),
            equipment(2, "defective", None),
            equipment(3, "inoperative", None),
            equipment(4, "", None),
            equipment(5, "garbage", None),
        ];
        let dist = state_distribution(&roster);
        assert_eq!(dist.optimal, 3);
        assert_eq!(dist.defective, 1);
        assert_eq!(dist.inoperative, 1);
    }

    #[test]
    fn breakdown_excludes_unassigned_equipment() {
        let departments = vec![department(1, "Dirección de Informática")];
        let roster = vec![
            equipment(1, "optimal", Some(1)),
            equipment(2, "defective", None),
        ];
        let cards = department_breakdown(&departments, &roster);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].states.optimal, 1);
        assert_eq!(cards[0].states.defective, 0);
        // The unassigned unit still shows up in the global distribution
        assert_eq!(state_distribution(&roster).defective, 1);
    }

    #[test]
    fn breakdown_orders_hierarchy_first_then_alphabetical() {
        let departments = vec![
            department(1, "Archivo Central"),
            department(2, "Dirección de Informática"),
            department(3, "Presidencia"),
            department(4, "Biblioteca"),
        ];
        let roster = vec![
            equipment(1, "optimal", Some(1)),
            equipment(2, "optimal", Some(2)),
            equipment(3, "optimal", Some(3)),
            equipment(4, "optimal", Some(4)),
        ];
        let cards = department_breakdown(&departments, &roster);
        let names: Vec<&str> = cards.iter().map(|c| c.department_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Presidencia",
                "Dirección de Informática",
                "Archivo Central",
                "Biblioteca",
            ]
        );
    }

    #[test]
    fn breakdown_skips_departments_without_equipment() {
        let departments = vec![department(1, "Presidencia"), department(2, "Secretaría")];
        let roster = vec![equipment(1, "optimal", Some(2))];
        let cards = department_breakdown(&departments, &roster);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].department_name, "Secretaría");
    }
}
