//! Workbook field set codec
//!
//! One sheet per object, one row per record, a bold header row naming the
//! columns. Every known column has a declared [`ColumnKind`] and cells are
//! read back according to it rather than by what the spreadsheet engine
//! inferred, so a numeric-looking label stays text and a length stays a
//! number.
//!
//! The writer stores an empty string as no cell at all, so a blank cell is
//! read back by column: `""` for required text, `null` for optional values.
//!
//! List-valued fields are flattened:
//! - `migration_notes` is newline-joined; a blank cell reads back as `[]`.
//!   Lists the joined text cannot carry exactly (`[""]`, notes holding a
//!   newline, text opening with `[`) are written as a JSON array instead
//! - `picklist_values` is a JSON string; a blank cell reads back as `null`

use super::{FieldSetCodec, Format};
use crate::error::{DecodeError, EncodeError};
use crate::raw::{RawFieldSet, RawRecord};
use calamine::{Data, Range, Reader, Xlsx};
use rust_xlsxwriter::{Format as CellFormat, Workbook, Worksheet};
use serde_json::{Number, Value};
use sf2hs_fields::{FieldRecord, ObjectFieldSet};
use std::io::Cursor;

/// How a column's cells are written and read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Always text, whatever the cell looks like; blank is `""`
    Text,
    /// Text when present; blank is null
    OptionalText,
    /// Whole number; blank is null
    Integer,
    /// Boolean cell
    Flag,
    /// List of strings, newline-joined
    Lines,
    /// JSON document in a text cell
    Json,
    /// Column not in the schema; cell type is taken as found
    Inferred,
}

/// A named, typed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn column(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

/// Column schema in sheet order
pub const COLUMNS: [Column; 15] = [
    column("name", ColumnKind::Text),
    column("label", ColumnKind::Text),
    column("type", ColumnKind::Text),
    column("length", ColumnKind::Integer),
    column("precision", ColumnKind::Integer),
    column("scale", ColumnKind::Integer),
    column("required", ColumnKind::Flag),
    column("unique", ColumnKind::Flag),
    column("updateable", ColumnKind::Flag),
    column("createable", ColumnKind::Flag),
    column("picklist_values", ColumnKind::Json),
    column("can_migrate", ColumnKind::Flag),
    column("migration_type", ColumnKind::Text),
    column("migration_notes", ColumnKind::Lines),
    column("hubspot_property", ColumnKind::OptionalText),
];

const HUBSPOT_PROPERTY: &str = "hubspot_property";

fn column_kind(name: &str) -> ColumnKind {
    COLUMNS
        .iter()
        .find(|c| c.name == name)
        .map_or(ColumnKind::Inferred, |c| c.kind)
}

/// XLSX codec
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelCodec;

impl ExcelCodec {
    /// Create new workbook codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FieldSetCodec for ExcelCodec {
    fn format(&self) -> Format {
        Format::Excel
    }

    fn encode(&self, set: &ObjectFieldSet) -> Result<Vec<u8>, EncodeError> {
        // A workbook always has a sheet; writing none would invent one on read
        if set.is_empty() {
            return Err(EncodeError::Workbook("no objects to write".to_string()));
        }

        let mut workbook = Workbook::new();
        let header_format = CellFormat::new().set_bold();

        for (object, records) in set {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(object)
                .map_err(|e| EncodeError::Workbook(format!("sheet '{object}': {e}")))?;
            write_sheet(worksheet, records, &header_format)
                .map_err(|e| EncodeError::Workbook(format!("sheet '{object}': {e}")))?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| EncodeError::Workbook(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<RawFieldSet, DecodeError> {
        let mut workbook: Xlsx<Cursor<&[u8]>> =
            Xlsx::new(Cursor::new(bytes)).map_err(|e| DecodeError::Workbook(e.to_string()))?;

        let mut set = RawFieldSet::new();
        for sheet in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet)
                .map_err(|e| DecodeError::Workbook(format!("sheet '{sheet}': {e}")))?;
            let records = decode_sheet(&sheet, &range)?;
            set.insert(sheet, records);
        }
        Ok(set)
    }
}

enum Cell {
    Blank,
    Text(String),
    Number(f64),
    Flag(bool),
}

fn write_sheet(
    worksheet: &mut Worksheet,
    records: &[FieldRecord],
    header_format: &CellFormat,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    let with_property = records.iter().any(|r| r.hubspot_property.is_some());
    let columns: Vec<&Column> = COLUMNS
        .iter()
        .filter(|c| with_property || c.name != HUBSPOT_PROPERTY)
        .collect();

    for (col, column) in (0u16..).zip(&columns) {
        worksheet.write_string_with_format(0, col, column.name, header_format)?;
    }

    for (row, record) in (1u32..).zip(records) {
        for (col, column) in (0u16..).zip(&columns) {
            match cell_for(record, column.name) {
                Cell::Blank => {}
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row, col, number)?;
                }
                Cell::Flag(flag) => {
                    worksheet.write_boolean(row, col, flag)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(())
}

fn cell_for(record: &FieldRecord, column: &str) -> Cell {
    let number = |value: Option<u32>| value.map_or(Cell::Blank, |v| Cell::Number(f64::from(v)));
    let text = |value: Option<&String>| value.map_or(Cell::Blank, |v| Cell::Text(v.clone()));

    match column {
        "name" => Cell::Text(record.name.clone()),
        "label" => Cell::Text(record.label.clone()),
        "type" => Cell::Text(record.field_type.clone()),
        "length" => number(record.length),
        "precision" => number(record.precision),
        "scale" => number(record.scale),
        "required" => Cell::Flag(record.required),
        "unique" => Cell::Flag(record.unique),
        "updateable" => Cell::Flag(record.updateable),
        "createable" => Cell::Flag(record.createable),
        "picklist_values" => match &record.picklist_values {
            // Vec<PicklistValue> always serializes
            Some(values) => serde_json::to_string(values).map_or(Cell::Blank, Cell::Text),
            None => Cell::Blank,
        },
        "can_migrate" => Cell::Flag(record.can_migrate),
        "migration_type" => Cell::Text(record.migration_type.as_str().to_string()),
        "migration_notes" => notes_cell(&record.migration_notes),
        HUBSPOT_PROPERTY => text(record.hubspot_property.as_ref()),
        _ => Cell::Blank,
    }
}

fn notes_cell(notes: &[String]) -> Cell {
    if notes.is_empty() {
        return Cell::Blank;
    }
    let joined = notes.join("\n");
    let exact = !joined.is_empty() && !joined.starts_with('[') && notes.iter().all(|n| !n.contains('\n'));
    if exact {
        return Cell::Text(joined);
    }
    // Vec<String> always serializes
    serde_json::to_string(notes).map_or(Cell::Blank, Cell::Text)
}

fn decode_sheet(sheet: &str, range: &Range<Data>) -> Result<Vec<RawRecord>, DecodeError> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns: Vec<String> = header.iter().map(header_name).collect();

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let mut record = RawRecord::new();
        for (name, cell) in columns.iter().zip(row) {
            if name.is_empty() {
                continue;
            }
            let value = read_cell(column_kind(name), cell).map_err(|message| DecodeError::InvalidCell {
                sheet: sheet.to_string(),
                row: offset + 2,
                column: name.clone(),
                message,
            })?;
            record.insert(name.clone(), value);
        }
        records.push(record);
    }
    Ok(records)
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn read_cell(kind: ColumnKind, cell: &Data) -> Result<Value, String> {
    let value = match (kind, cell) {
        (ColumnKind::Lines, Data::Empty) => Value::Array(Vec::new()),
        (ColumnKind::Text, Data::Empty) => Value::String(String::new()),
        (_, Data::Empty) => Value::Null,

        (ColumnKind::Text | ColumnKind::OptionalText, Data::String(s)) => Value::String(s.clone()),
        (ColumnKind::Text | ColumnKind::OptionalText, other) => Value::String(other.to_string()),

        (ColumnKind::Integer, Data::Int(i)) => Value::from(*i),
        (ColumnKind::Integer, Data::Float(f)) => float_value(*f),
        (ColumnKind::Integer, Data::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_or_else(|_| Value::String(s.clone()), Value::from),

        (ColumnKind::Flag, Data::Bool(b)) => Value::Bool(*b),
        (ColumnKind::Flag, Data::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(s.clone()),
        },

        (ColumnKind::Lines, Data::String(s)) if s.is_empty() => Value::Array(Vec::new()),
        (ColumnKind::Lines, Data::String(s)) => lines_value(s),
        (ColumnKind::Lines, other) => Value::Array(vec![Value::String(other.to_string())]),

        (ColumnKind::Json, Data::String(s)) if s.trim().is_empty() => Value::Null,
        (ColumnKind::Json, Data::String(s)) => {
            serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))?
        }

        (_, other) => inferred(other),
    };
    Ok(value)
}

fn lines_value(text: &str) -> Value {
    if text.starts_with('[') {
        if let Ok(notes) = serde_json::from_str::<Vec<String>>(text) {
            return Value::from(notes);
        }
    }
    Value::Array(text.split('\n').map(|line| Value::String(line.to_string())).collect())
}

fn inferred(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => float_value(*f),
        Data::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

/// Workbooks store every number as a float; whole values read back as integers
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_value(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::into_field_set;
    use pretty_assertions::assert_eq;
    use sf2hs_fields::{FieldMetadata, MigrationType};

    fn roundtrip(set: &ObjectFieldSet) -> RawFieldSet {
        let bytes = ExcelCodec.encode(set).unwrap();
        ExcelCodec.decode(&bytes).unwrap()
    }

    fn single(object: &str, records: Vec<FieldRecord>) -> ObjectFieldSet {
        let mut set = ObjectFieldSet::new();
        set.insert(object.to_string(), records);
        set
    }

    #[test]
    fn notes_are_newline_joined() {
        let mut record = FieldRecord::from_metadata(&FieldMetadata::new("Name", "string"));
        record.migration_notes = vec!["a".to_string(), "b".to_string()];
        let plain = FieldRecord::from_metadata(&FieldMetadata::new("Phone", "phone"));

        assert!(matches!(cell_for(&record, "migration_notes"), Cell::Text(ref s) if s == "a\nb"));
        assert!(matches!(cell_for(&plain, "migration_notes"), Cell::Blank));

        let raw = roundtrip(&single("Account", vec![record, plain]));
        assert_eq!(raw["Account"][0]["migration_notes"], serde_json::json!(["a", "b"]));
        assert_eq!(raw["Account"][1]["migration_notes"], serde_json::json!([]));
    }

    #[test]
    fn picklists_roundtrip_through_json_cells() {
        let picklist = FieldRecord::from_metadata(
            &FieldMetadata::new("Industry", "picklist").with_picklist_value("Energy", "Energy"),
        );
        let empty = FieldRecord::from_metadata(&FieldMetadata::new("Tier__c", "picklist"));
        let text = FieldRecord::from_metadata(&FieldMetadata::new("Site", "string"));
        let set = single("Account", vec![picklist, empty, text]);

        let back = into_field_set(roundtrip(&set)).unwrap();
        assert_eq!(back, set);
        assert_eq!(back["Account"][1].picklist_values, Some(vec![]));
        assert_eq!(back["Account"][2].picklist_values, None);
    }

    #[test]
    fn typed_roundtrip_is_exact() {
        let records = vec![
            FieldRecord::from_metadata(
                &FieldMetadata::new("Amount", "currency")
                    .with_label("12345")
                    .with_precision(18, 2)
                    .writable(),
            ),
            FieldRecord::from_metadata(&FieldMetadata::new("OwnerId", "reference").with_reference("User"))
                .with_hubspot_property("hubspot_owner_id"),
            FieldRecord::from_metadata(&FieldMetadata::new("ShippingAddress", "address")),
        ];
        let mut set = single("Opportunity", records);
        set.insert(
            "Contact".to_string(),
            vec![FieldRecord::from_metadata(&FieldMetadata::new("Email", "email").with_length(80))],
        );

        let back = into_field_set(roundtrip(&set)).unwrap();
        assert_eq!(back, set);
        assert_eq!(back["Opportunity"][0].label, "12345");
        assert_eq!(back["Opportunity"][1].migration_type, MigrationType::UserReference);
    }

    #[test]
    fn empty_required_text_reads_back_as_empty_string() {
        let unlabeled = FieldRecord::from_metadata(&FieldMetadata::new("Name", "string").with_label(""));
        let set = single("Account", vec![unlabeled]);

        let raw = roundtrip(&set);
        assert_eq!(raw["Account"][0]["label"], Value::String(String::new()));

        let back = into_field_set(raw).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn ambiguous_notes_survive_as_json_cells() {
        let lists: Vec<Vec<String>> = vec![
            vec![String::new()],
            vec![String::new(), String::new()],
            vec!["two\nlines".to_string()],
            vec!["[bracketed]".to_string(), "plain".to_string()],
        ];
        let records: Vec<FieldRecord> = lists
            .iter()
            .map(|notes| {
                let mut record = FieldRecord::from_metadata(&FieldMetadata::new("Name", "string"));
                record.migration_notes.clone_from(notes);
                record
            })
            .collect();
        let set = single("Account", records);

        assert!(matches!(cell_for(&set["Account"][0], "migration_notes"), Cell::Text(ref s) if s == r#"[""]"#));
        assert!(matches!(cell_for(&set["Account"][1], "migration_notes"), Cell::Text(ref s) if s == "\n"));

        let back = into_field_set(roundtrip(&set)).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn blank_property_cell_is_absent() {
        let with = FieldRecord::from_metadata(&FieldMetadata::new("Email", "email")).with_hubspot_property("email");
        let without = FieldRecord::from_metadata(&FieldMetadata::new("Phone", "phone"));
        let set = single("Contact", vec![with, without]);

        let raw = roundtrip(&set);
        assert_eq!(raw["Contact"][1]["hubspot_property"], Value::Null);
        assert_eq!(into_field_set(raw).unwrap(), set);
    }

    #[test]
    fn property_column_only_when_used() {
        let set = single("Lead", vec![FieldRecord::from_metadata(&FieldMetadata::new("Company", "string"))]);
        let raw = roundtrip(&set);
        assert!(!raw["Lead"][0].contains_key("hubspot_property"));
        assert_eq!(raw["Lead"][0]["length"], Value::Null);
    }

    #[test]
    fn empty_object_decodes_to_no_records() {
        let raw = roundtrip(&single("Case", vec![]));
        assert!(raw["Case"].is_empty());
    }

    #[test]
    fn empty_set_cannot_be_written() {
        assert!(matches!(ExcelCodec.encode(&ObjectFieldSet::new()), Err(EncodeError::Workbook(_))));
    }

    #[test]
    fn overlong_sheet_name_is_rejected() {
        let set = single(
            "A_Very_Long_Custom_Object_Name__c",
            vec![FieldRecord::from_metadata(&FieldMetadata::new("Name", "string"))],
        );
        assert!(matches!(ExcelCodec.encode(&set), Err(EncodeError::Workbook(_))));
    }

    #[test]
    fn garbage_is_a_workbook_error() {
        assert!(matches!(ExcelCodec.decode(b"not a workbook"), Err(DecodeError::Workbook(_))));
    }

    #[test]
    fn cells_follow_column_kind() {
        assert_eq!(read_cell(ColumnKind::Text, &Data::Float(42.0)).unwrap(), Value::String("42".to_string()));
        assert_eq!(read_cell(ColumnKind::Integer, &Data::Float(255.0)).unwrap(), Value::from(255));
        assert_eq!(read_cell(ColumnKind::Flag, &Data::String("TRUE".to_string())).unwrap(), Value::Bool(true));
        assert_eq!(read_cell(ColumnKind::Json, &Data::Empty).unwrap(), Value::Null);
        assert_eq!(read_cell(ColumnKind::Lines, &Data::Empty).unwrap(), Value::Array(vec![]));
        assert_eq!(read_cell(ColumnKind::Text, &Data::Empty).unwrap(), Value::String(String::new()));
        assert_eq!(read_cell(ColumnKind::OptionalText, &Data::Empty).unwrap(), Value::Null);
        assert_eq!(
            read_cell(ColumnKind::Lines, &Data::String("[not json".to_string())).unwrap(),
            serde_json::json!(["[not json"])
        );
        assert!(read_cell(ColumnKind::Json, &Data::String("[{".to_string())).is_err());
    }
}
