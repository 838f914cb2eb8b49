//! The JSON body of a retrieve request.

use reforce_calendar::{YearMonth, request_days, request_hours};
use serde::Serialize;

use crate::error::CdsError;

/// Bounding box in degrees, serialized as `[north, west, south, east]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 4]")]
pub struct Area {
    /// Northern edge.
    pub north: f64,
    /// Western edge.
    pub west: f64,
    /// Southern edge.
    pub south: f64,
    /// Eastern edge.
    pub east: f64,
}

impl From<Area> for [f64; 4] {
    fn from(a: Area) -> Self {
        [a.north, a.west, a.south, a.east]
    }
}

impl From<[f64; 4]> for Area {
    fn from([north, west, south, east]: [f64; 4]) -> Self {
        Self {
            north,
            west,
            south,
            east,
        }
    }
}

/// Output grid spacing in degrees, serialized as
/// `[east_west, north_south]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct GridSpacing {
    /// Longitude increment.
    pub east_west: f64,
    /// Latitude increment.
    pub north_south: f64,
}

impl From<GridSpacing> for [f64; 2] {
    fn from(g: GridSpacing) -> Self {
        [g.east_west, g.north_south]
    }
}

impl From<[f64; 2]> for GridSpacing {
    fn from([east_west, north_south]: [f64; 2]) -> Self {
        Self {
            east_west,
            north_south,
        }
    }
}

/// A retrieve request for hourly single-level fields.
///
/// Field names follow the archive's request vocabulary so the struct
/// serializes directly into the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrieveRequest {
    product_type: String,
    format: String,
    variable: Vec<String>,
    year: String,
    month: String,
    day: Vec<String>,
    time: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    area: Option<Area>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<GridSpacing>,
}

impl RetrieveRequest {
    /// Every day and hour of `month` for `variables`, as `reanalysis` in
    /// `netcdf` format on the native grid.
    pub fn monthly<S: Into<String>>(
        variables: impl IntoIterator<Item = S>,
        month: YearMonth,
    ) -> Self {
        Self {
            product_type: "reanalysis".to_string(),
            format: "netcdf".to_string(),
            variable: variables.into_iter().map(Into::into).collect(),
            year: format!("{:04}", month.year()),
            month: format!("{:02}", month.month()),
            day: request_days(month),
            time: request_hours(),
            area: None,
            grid: None,
        }
    }

    /// Restrict the request to a bounding box.
    pub fn with_area(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }

    /// Regrid to the given spacing.
    pub fn with_grid(mut self, grid: GridSpacing) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the product type, e.g. `reanalysis`.
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// Set the delivery format, e.g. `netcdf`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Requested variables.
    pub fn variables(&self) -> &[String] {
        &self.variable
    }

    /// Requested year, e.g. `2018`.
    pub fn year(&self) -> &str {
        &self.year
    }

    /// Requested month, zero-padded.
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Requested days, zero-padded.
    pub fn days(&self) -> &[String] {
        &self.day
    }

    /// Requested bounding box.
    pub fn area(&self) -> Option<Area> {
        self.area
    }

    /// Requested grid spacing.
    pub fn grid(&self) -> Option<GridSpacing> {
        self.grid
    }

    /// Validate the request before sending it.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::InvalidRequest`] if no variable is requested,
    /// the area has its north edge south of its south edge, or a grid
    /// spacing is not positive.
    pub fn validate(&self) -> Result<(), CdsError> {
        if self.variable.is_empty() {
            return Err(CdsError::InvalidRequest {
                reason: "no variables requested".to_string(),
            });
        }
        if let Some(area) = self.area
            && area.north < area.south
        {
            return Err(CdsError::InvalidRequest {
                reason: format!(
                    "area north edge {} is south of south edge {}",
                    area.north, area.south
                ),
            });
        }
        if let Some(grid) = self.grid
            && (grid.east_west <= 0.0 || grid.north_south <= 0.0)
        {
            return Err(CdsError::InvalidRequest {
                reason: format!(
                    "grid spacing must be positive, got [{}, {}]",
                    grid.east_west, grid.north_south
                ),
            });
        }
        Ok(())
    }

    /// The request as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::InvalidRequest`] if serialization fails, which
    /// only happens for non-finite coordinates.
    pub fn to_json(&self) -> Result<serde_json::Value, CdsError> {
        serde_json::to_value(self).map_err(|e| CdsError::InvalidRequest {
            reason: e.to_string(),
        })
    }
}
