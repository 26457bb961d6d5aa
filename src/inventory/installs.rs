//! Flat row types stored as CSV tables.

use chrono::{DateTime, Utc};

use crate::{
    error::DecodeError,
    table::{Cell, CellKind, Column, Tabular},
};

type SetResult = Result<(), DecodeError>;

fn no_such_column<T: Tabular>(index: usize) -> DecodeError {
    DecodeError::NoSuchColumn {
        index,
        columns: T::columns().len(),
    }
}

/// Inventory asset register entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Asset {
    pub model: String,
    pub serial: String,
    pub number: String,
}

const ASSET_COLUMNS: &[Column] = &[
    Column::new("model", CellKind::Text).labelled("Model Name"),
    Column::new("serial", CellKind::Text).labelled("Serial Number"),
    Column::new("number", CellKind::Text).labelled("Asset Number"),
];

impl Tabular for Asset {
    fn columns() -> &'static [Column] {
        ASSET_COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.model.clone()),
            Cell::Text(self.serial.clone()),
            Cell::Text(self.number.clone()),
        ]
    }

    fn set_cell(&mut self, index: usize, cell: Cell) -> SetResult {
        match index {
            0 => self.model = cell.into_text("model")?,
            1 => self.serial = cell.into_text("serial")?,
            2 => self.number = cell.into_text("number")?,
            other => return Err(no_such_column::<Self>(other)),
        }
        Ok(())
    }
}

/// A period during which a piece of equipment was installed at a location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentInstall {
    pub location: String,
    pub model: String,
    pub serial: String,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

const EQUIPMENT_INSTALL_COLUMNS: &[Column] = &[
    Column::new("location", CellKind::Text).labelled("Equipment Location"),
    Column::new("model", CellKind::Text).labelled("Equipment Model"),
    Column::new("serial", CellKind::Text).labelled("Equipment Serial Number"),
    Column::new("start", CellKind::Timestamp).labelled("Installation Start"),
    Column::new("stop", CellKind::Timestamp).labelled("Installation Stop"),
];

impl Tabular for EquipmentInstall {
    fn columns() -> &'static [Column] {
        EQUIPMENT_INSTALL_COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.location.clone()),
            Cell::Text(self.model.clone()),
            Cell::Text(self.serial.clone()),
            Cell::Timestamp(self.start),
            Cell::Timestamp(self.stop),
        ]
    }

    fn set_cell(&mut self, index: usize, cell: Cell) -> SetResult {
        match index {
            0 => self.location = cell.into_text("location")?,
            1 => self.model = cell.into_text("model")?,
            2 => self.serial = cell.into_text("serial")?,
            3 => self.start = cell.into_timestamp("start")?,
            4 => self.stop = cell.into_timestamp("stop")?,
            other => return Err(no_such_column::<Self>(other)),
        }
        Ok(())
    }
}

/// Sensor installation with its orientation. Azimuth and dip are degrees,
/// depth is metres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorInstall {
    pub station: String,
    pub site: String,
    pub model: String,
    pub serial: String,
    pub azimuth: f64,
    pub dip: f64,
    pub depth: f64,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

const SENSOR_INSTALL_COLUMNS: &[Column] = &[
    Column::new("station", CellKind::Text).labelled("Seismic Station"),
    Column::new("site", CellKind::Text).labelled("Sensor Location"),
    Column::new("model", CellKind::Text).labelled("Sensor Model"),
    Column::new("serial", CellKind::Text).labelled("Sensor Serial Number"),
    Column::new("azimuth", CellKind::Float64),
    Column::new("dip", CellKind::Float64),
    Column::new("depth", CellKind::Float64),
    Column::new("start", CellKind::Timestamp).labelled("Installation Start"),
    Column::new("stop", CellKind::Timestamp).labelled("Installation Stop"),
];

impl Tabular for SensorInstall {
    fn columns() -> &'static [Column] {
        SENSOR_INSTALL_COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.station.clone()),
            Cell::Text(self.site.clone()),
            Cell::Text(self.model.clone()),
            Cell::Text(self.serial.clone()),
            Cell::Float64(self.azimuth),
            Cell::Float64(self.dip),
            Cell::Float64(self.depth),
            Cell::Timestamp(self.start),
            Cell::Timestamp(self.stop),
        ]
    }

    fn set_cell(&mut self, index: usize, cell: Cell) -> SetResult {
        match index {
            0 => self.station = cell.into_text("station")?,
            1 => self.site = cell.into_text("site")?,
            2 => self.model = cell.into_text("model")?,
            3 => self.serial = cell.into_text("serial")?,
            4 => self.azimuth = cell.into_f64("azimuth")?,
            5 => self.dip = cell.into_f64("dip")?,
            6 => self.depth = cell.into_f64("depth")?,
            7 => self.start = cell.into_timestamp("start")?,
            8 => self.stop = cell.into_timestamp("stop")?,
            other => return Err(no_such_column::<Self>(other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataloggerInstall {
    pub station: String,
    pub site: String,
    pub model: String,
    pub serial: String,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

const DATALOGGER_INSTALL_COLUMNS: &[Column] = &[
    Column::new("station", CellKind::Text).labelled("Seismic Station"),
    Column::new("site", CellKind::Text).labelled("Datalogger Location"),
    Column::new("model", CellKind::Text).labelled("Datalogger Model"),
    Column::new("serial", CellKind::Text).labelled("Datalogger Serial Number"),
    Column::new("start", CellKind::Timestamp).labelled("Installation Start"),
    Column::new("stop", CellKind::Timestamp).labelled("Installation Stop"),
];

impl Tabular for DataloggerInstall {
    fn columns() -> &'static [Column] {
        DATALOGGER_INSTALL_COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.station.clone()),
            Cell::Text(self.site.clone()),
            Cell::Text(self.model.clone()),
            Cell::Text(self.serial.clone()),
            Cell::Timestamp(self.start),
            Cell::Timestamp(self.stop),
        ]
    }

    fn set_cell(&mut self, index: usize, cell: Cell) -> SetResult {
        match index {
            0 => self.station = cell.into_text("station")?,
            1 => self.site = cell.into_text("site")?,
            2 => self.model = cell.into_text("model")?,
            3 => self.serial = cell.into_text("serial")?,
            4 => self.start = cell.into_timestamp("start")?,
            5 => self.stop = cell.into_timestamp("stop")?,
            other => return Err(no_such_column::<Self>(other)),
        }
        Ok(())
    }
}

/// Radio link endpoint. Headers are the camel-cased field names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadioInstall {
    pub location: String,
    pub target: String,
    pub role: String,
    pub model: String,
    pub serial: String,
    pub polarity: String,
    pub frequency: i32,
    pub gain: f32,
}

const RADIO_INSTALL_COLUMNS: &[Column] = &[
    Column::new("location", CellKind::Text),
    Column::new("target", CellKind::Text),
    Column::new("role", CellKind::Text),
    Column::new("model", CellKind::Text),
    Column::new("serial", CellKind::Text),
    Column::new("polarity", CellKind::Text),
    Column::new("frequency", CellKind::Int32),
    Column::new("gain", CellKind::Float32),
];

impl Tabular for RadioInstall {
    fn columns() -> &'static [Column] {
        RADIO_INSTALL_COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.location.clone()),
            Cell::Text(self.target.clone()),
            Cell::Text(self.role.clone()),
            Cell::Text(self.model.clone()),
            Cell::Text(self.serial.clone()),
            Cell::Text(self.polarity.clone()),
            Cell::Int32(self.frequency),
            Cell::Float32(self.gain),
        ]
    }

    fn set_cell(&mut self, index: usize, cell: Cell) -> SetResult {
        match index {
            0 => self.location = cell.into_text("location")?,
            1 => self.target = cell.into_text("target")?,
            2 => self.role = cell.into_text("role")?,
            3 => self.model = cell.into_text("model")?,
            4 => self.serial = cell.into_text("serial")?,
            5 => self.polarity = cell.into_text("polarity")?,
            6 => self.frequency = cell.into_i32("frequency")?,
            7 => self.gain = cell.into_f32("gain")?,
            other => return Err(no_such_column::<Self>(other)),
        }
        Ok(())
    }
}
