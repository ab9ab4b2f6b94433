use std::collections::BTreeMap;
use std::path::Path;

use crate::limits::MAX_CATALOG_ROOMS;
use crate::model::RoomId;

/// Static building → room-numbers mapping, the authoritative list of rooms
/// that may be booked. Validated once at load; immutable afterwards.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    buildings: BTreeMap<String, Vec<String>>,
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(String),
    Empty,
    EmptyBuildingId,
    EmptyRoomNumber { building: String },
    DuplicateRoom { building: String, number: String },
    TooManyRooms(usize),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog read failed: {e}"),
            CatalogError::Parse(e) => write!(f, "catalog parse failed: {e}"),
            CatalogError::Empty => write!(f, "catalog has no rooms"),
            CatalogError::EmptyBuildingId => write!(f, "catalog has an empty building id"),
            CatalogError::EmptyRoomNumber { building } => {
                write!(f, "building {building} has an empty room number")
            }
            CatalogError::DuplicateRoom { building, number } => {
                write!(f, "duplicate room {number} in building {building}")
            }
            CatalogError::TooManyRooms(n) => write!(f, "catalog has too many rooms: {n}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl RoomCatalog {
    /// Parse a `{"BUILDING": ["101", ...], ...}` JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let buildings: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_entries(buildings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(CatalogError::Io)?;
        Self::from_json(&json)
    }

    /// Validate and wrap a raw mapping. A malformed catalog is a startup
    /// failure, never a per-request one.
    pub fn from_entries(buildings: BTreeMap<String, Vec<String>>) -> Result<Self, CatalogError> {
        let mut total = 0usize;
        for (building, numbers) in &buildings {
            if building.trim().is_empty() {
                return Err(CatalogError::EmptyBuildingId);
            }
            let mut seen: Vec<&str> = Vec::with_capacity(numbers.len());
            for number in numbers {
                if number.trim().is_empty() {
                    return Err(CatalogError::EmptyRoomNumber {
                        building: building.clone(),
                    });
                }
                if seen.contains(&number.as_str()) {
                    return Err(CatalogError::DuplicateRoom {
                        building: building.clone(),
                        number: number.clone(),
                    });
                }
                seen.push(number);
                total += 1;
            }
        }
        if total == 0 {
            return Err(CatalogError::Empty);
        }
        if total > MAX_CATALOG_ROOMS {
            return Err(CatalogError::TooManyRooms(total));
        }
        Ok(Self { buildings })
    }

    /// The hard-wired campus used when no catalog file is configured.
    pub fn default_campus() -> Self {
        let buildings = BTreeMap::from([
            ("CECS".into(), vec!["501".into(), "502".into(), "503".into()]),
            ("GZB".into(), vec!["301".into(), "302".into(), "303".into()]),
            ("ABB".into(), vec!["101".into(), "102".into(), "103".into()]),
            ("HEB".into(), vec!["101".into(), "102".into(), "103".into()]),
        ]);
        Self::from_entries(buildings).expect("built-in campus catalog is valid")
    }

    /// Total number of rooms across all buildings.
    pub fn len(&self) -> usize {
        self.buildings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.buildings.iter().flat_map(|(building, numbers)| {
            numbers
                .iter()
                .map(move |number| RoomId::new(building.clone(), number.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_catalog() {
        let catalog =
            RoomCatalog::from_json(r#"{"CECS": ["501", "502"], "GZB": ["301"]}"#).unwrap();
        assert_eq!(catalog.len(), 3);
        let rooms: Vec<String> = catalog.rooms().map(|r| r.to_string()).collect();
        assert!(rooms.contains(&"CECS 501".to_string()));
        assert!(rooms.contains(&"GZB 301".to_string()));
    }

    #[test]
    fn rejects_duplicate_room() {
        let result = RoomCatalog::from_json(r#"{"CECS": ["501", "501"]}"#);
        assert!(matches!(result, Err(CatalogError::DuplicateRoom { .. })));
    }

    #[test]
    fn rejects_empty_building_id() {
        let result = RoomCatalog::from_json(r#"{"  ": ["501"]}"#);
        assert!(matches!(result, Err(CatalogError::EmptyBuildingId)));
    }

    #[test]
    fn rejects_empty_room_number() {
        let result = RoomCatalog::from_json(r#"{"CECS": [""]}"#);
        assert!(matches!(result, Err(CatalogError::EmptyRoomNumber { .. })));
    }

    #[test]
    fn rejects_catalog_without_rooms() {
        assert!(matches!(
            RoomCatalog::from_json(r#"{}"#),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            RoomCatalog::from_json(r#"{"CECS": []}"#),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = RoomCatalog::from_json("not json");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn default_campus_shape() {
        let catalog = RoomCatalog::default_campus();
        assert_eq!(catalog.len(), 12);
        let rooms: Vec<String> = catalog.rooms().map(|r| r.to_string()).collect();
        assert!(rooms.contains(&"CECS 501".to_string()));
        assert!(rooms.contains(&"HEB 103".to_string()));
    }
}
