use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use zone_config::HandleTuning;
use zone_editor::{
    Coordinate, HandleRef, HandleRole, MapEvent, MapSession, MemorySurface, Zone, ZoneConfig,
    ZoneId,
};

/// A recorded map session. Events address zones by their index in `zones`.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub camera_bearing: f64,
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    Click {
        zone: usize,
        role: HandleRole,
    },
    DragStart {
        zone: usize,
        role: HandleRole,
        position: Coordinate,
    },
    DragMove {
        zone: usize,
        role: HandleRole,
        position: Coordinate,
    },
    DragEnd {
        zone: usize,
        role: HandleRole,
        position: Coordinate,
    },
    CameraChanged {
        bearing: f64,
    },
    Select {
        zone: usize,
    },
    Remove {
        zone: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneSummary {
    pub id: ZoneId,
    pub label: String,
    pub center: Coordinate,
    pub radius_m: f64,
    pub resize_heading: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub zones: Vec<ZoneSummary>,
    pub markers: usize,
    pub circles: usize,
    pub dropped_events: usize,
}

pub fn replay(script: Script, tuning: HandleTuning) -> anyhow::Result<Summary> {
    let mut session = MapSession::new(MemorySurface::with_camera_bearing(script.camera_bearing));
    let mut ids = Vec::with_capacity(script.zones.len());
    for (index, config) in script.zones.into_iter().enumerate() {
        let zone = Zone::with_tuning(config, tuning)
            .with_context(|| format!("zone #{index} is invalid"))?;
        ids.push(session.show(zone));
    }

    let resolve = |zone: usize| -> anyhow::Result<ZoneId> {
        match ids.get(zone) {
            Some(id) => Ok(*id),
            None => bail!("event refers to zone #{zone} but only {} are defined", ids.len()),
        }
    };

    let mut dropped_events = 0;
    for event in script.events {
        let handled = match event {
            ScriptEvent::Click { zone, role } => session.handle(MapEvent::Click {
                handle: HandleRef::new(resolve(zone)?, role),
            }),
            ScriptEvent::DragStart {
                zone,
                role,
                position,
            } => session.handle(MapEvent::DragStart {
                handle: HandleRef::new(resolve(zone)?, role),
                position,
            }),
            ScriptEvent::DragMove {
                zone,
                role,
                position,
            } => session.handle(MapEvent::DragMove {
                handle: HandleRef::new(resolve(zone)?, role),
                position,
            }),
            ScriptEvent::DragEnd {
                zone,
                role,
                position,
            } => session.handle(MapEvent::DragEnd {
                handle: HandleRef::new(resolve(zone)?, role),
                position,
            }),
            ScriptEvent::CameraChanged { bearing } => {
                session.handle(MapEvent::CameraChanged { bearing })
            }
            ScriptEvent::Select { zone } => session.select(resolve(zone)?),
            ScriptEvent::Remove { zone } => session.remove(resolve(zone)?).is_some(),
        };
        if !handled {
            dropped_events += 1;
        }
    }

    let zones = session
        .registry()
        .iter()
        .map(|zone| ZoneSummary {
            id: zone.id(),
            label: zone.label().to_string(),
            center: zone.center(),
            radius_m: zone.radius_m(),
            resize_heading: zone.resize_heading(),
            selected: zone.is_selected(),
        })
        .collect();

    Ok(Summary {
        zones,
        markers: session.surface().marker_count(),
        circles: session.surface().circle_count(),
        dropped_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Script {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn replays_resize_and_close() {
        let script = parse(
            r#"{
                "zones": [
                    {"label": "A", "center": {"latitude": 0.0, "longitude": 0.0}},
                    {"label": "B", "center": {"latitude": 0.01, "longitude": 0.01}}
                ],
                "events": [
                    {"kind": "drag_start", "zone": 1, "role": "resize",
                     "position": {"latitude": 0.01, "longitude": 0.01}},
                    {"kind": "drag_end", "zone": 1, "role": "resize",
                     "position": {"latitude": 0.01, "longitude": 0.01001}},
                    {"kind": "click", "zone": 0, "role": "close"},
                    {"kind": "click", "zone": 0, "role": "center"},
                    {"kind": "click", "zone": 0, "role": "close"},
                    {"kind": "click", "zone": 0, "role": "close"}
                ]
            }"#,
        );
        let summary = replay(script, HandleTuning::default()).unwrap();

        assert_eq!(summary.zones.len(), 1);
        let b = &summary.zones[0];
        assert_eq!(b.label, "B");
        assert!(!b.selected);
        assert_eq!(b.radius_m, 5.0);
        assert_eq!(summary.markers, 1);
        assert_eq!(summary.circles, 1);
        assert_eq!(summary.dropped_events, 2);
    }

    #[test]
    fn unknown_zone_index_is_an_error() {
        let script = parse(
            r#"{"zones": [{}], "events": [{"kind": "select", "zone": 3}]}"#,
        );
        let err = replay(script, HandleTuning::default()).unwrap_err();
        assert!(err.to_string().contains("zone #3"));
    }

    #[test]
    fn invalid_zone_is_reported_with_index() {
        let script = parse(
            r#"{"zones": [{}, {"center": {"latitude": 95.0, "longitude": 0.0}}]}"#,
        );
        let err = replay(script, HandleTuning::default()).unwrap_err();
        assert!(err.to_string().contains("zone #1"));
    }
}
