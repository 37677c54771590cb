//! The building creation form.
//!
//! Field errors are plain data: a map from [`Field`] to message that the renderer shows
//! next to each input. Nothing here reaches into the page to flag inputs.

use std::collections::BTreeMap;

use tracing::{error, info, warn};

use super::{AppRoute, Navigator};
use crate::error::{ClientError, ClientResult};
use crate::gateway::FileGateway;
use crate::types::{Building, NewBuilding};

pub const MSG_REQUIRED: &str = "Please fill in this field.";
pub const MSG_NEGATIVE: &str = "Negative numbers are not allowed.";
pub const MSG_NOT_A_NUMBER: &str = "Please enter a number.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    BuildingName,
    Address,
    TotalArea,
    GroundFloors,
    BasementFloors,
}

impl Field {
    pub const ALL: [Field; 5] =
        [Field::BuildingName, Field::Address, Field::TotalArea, Field::GroundFloors, Field::BasementFloors];

    /// Wire and input name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::BuildingName => "buildingName",
            Field::Address => "address",
            Field::TotalArea => "totalArea",
            Field::GroundFloors => "groundFloors",
            Field::BasementFloors => "basementFloors",
        }
    }

    pub fn is_floor_count(&self) -> bool {
        matches!(self, Field::GroundFloors | Field::BasementFloors)
    }
}

/// The form inputs exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingDraft {
    pub building_name: String,
    pub address: String,
    pub total_area: String,
    pub ground_floors: String,
    pub basement_floors: String,
}

impl BuildingDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::BuildingName => &self.building_name,
            Field::Address => &self.address,
            Field::TotalArea => &self.total_area,
            Field::GroundFloors => &self.ground_floors,
            Field::BasementFloors => &self.basement_floors,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::BuildingName => &mut self.building_name,
            Field::Address => &mut self.address,
            Field::TotalArea => &mut self.total_area,
            Field::GroundFloors => &mut self.ground_floors,
            Field::BasementFloors => &mut self.basement_floors,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingForm {
    draft: BuildingDraft,
    errors: BTreeMap<Field, String>,
    lookup_open: bool,
}

impl BuildingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &BuildingDraft {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_lookup_open(&self) -> bool {
        self.lookup_open
    }

    /// Input change. A negative floor count is refused and the previous value kept.
    pub fn set_field(&mut self, field: Field, value: &str) -> ClientResult<()> {
        if field.is_floor_count() && is_negative(value) {
            warn!(field = field.name(), value, "negative floor count rejected");
            self.errors.insert(field, MSG_NEGATIVE.to_string());
            return Err(ClientError::validation(field.name(), MSG_NEGATIVE));
        }
        *self.draft.slot(field) = value.to_string();
        self.errors.remove(&field);
        Ok(())
    }

    pub fn open_address_lookup(&mut self) {
        self.lookup_open = true;
    }

    pub fn close_address_lookup(&mut self) {
        self.lookup_open = false;
    }

    /// Takes the address picked in the lookup dialog and closes it.
    pub fn apply_address(&mut self, address: &str) {
        self.draft.address = address.to_string();
        self.errors.remove(&Field::Address);
        self.lookup_open = false;
    }

    /// Checks the draft and builds the request body.
    ///
    /// Building name and address are checked first, in that order, and the first missing
    /// one stops the check. Optional numeric fields must parse when filled in.
    pub fn validate(&mut self) -> ClientResult<NewBuilding> {
        self.errors.clear();

        for field in [Field::BuildingName, Field::Address] {
            if self.draft.get(field).trim().is_empty() {
                return Err(self.reject(field, MSG_REQUIRED));
            }
        }

        let total_area = match parse_optional::<f64>(&self.draft.total_area) {
            Ok(v) if v.is_some_and(|a| a < 0.0 || !a.is_finite()) => {
                return Err(self.reject(Field::TotalArea, MSG_NEGATIVE))
            }
            Ok(v) => v,
            Err(()) => return Err(self.reject(Field::TotalArea, MSG_NOT_A_NUMBER)),
        };
        let mut floors = [None, None];
        for (slot, field) in floors.iter_mut().zip([Field::GroundFloors, Field::BasementFloors]) {
            let raw = self.draft.get(field);
            if is_negative(raw) {
                return Err(self.reject(field, MSG_NEGATIVE));
            }
            match parse_optional::<u32>(raw) {
                Ok(v) => *slot = v,
                Err(()) => return Err(self.reject(field, MSG_NOT_A_NUMBER)),
            }
        }

        Ok(NewBuilding {
            building_name: self.draft.building_name.trim().to_string(),
            address: self.draft.address.trim().to_string(),
            total_area,
            ground_floors: floors[0],
            basement_floors: floors[1],
        })
    }

    fn reject(&mut self, field: Field, message: &str) -> ClientError {
        self.errors.insert(field, message.to_string());
        ClientError::validation(field.name(), message)
    }

    /// Validates, creates the building and moves on to the buildings listing.
    pub async fn submit<G: FileGateway>(&mut self, gateway: &G, navigator: &dyn Navigator) -> ClientResult<Building> {
        let request = self.validate()?;
        create_building(&request, gateway, navigator).await
    }
}

/// Sends a validated building and navigates to the listing on success.
///
/// Failures are logged and returned; the form keeps its inputs.
pub async fn create_building<G: FileGateway>(
    request: &NewBuilding,
    gateway: &G,
    navigator: &dyn Navigator,
) -> ClientResult<Building> {
    match gateway.create_building(request).await {
        Ok(building) => {
            info!(building_id = building.id, name = %building.details.building_name, "building created");
            navigator.navigate(AppRoute::Buildings);
            Ok(building)
        }
        Err(e) => {
            error!("There was an error submitting the form: {}", e);
            Err(match e {
                ClientError::CreateFailed(_) => e,
                other => ClientError::CreateFailed(other.to_string()),
            })
        }
    }
}

fn is_negative(value: &str) -> bool {
    value.trim().parse::<f64>().map(|v| v < 0.0).unwrap_or(false)
}

fn parse_optional<T: std::str::FromStr>(value: &str) -> Result<Option<T>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(|_| ())
}
