// glowup-pdf: form field naming
//
// Field names are read back by whoever fills the PDF, so the spelling of
// every name produced here is part of the document format.

use std::fmt;

use serde::Serialize;

/// Body rows of the weekly grid, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat, Day::Sun];

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    pub fn from_label(label: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// The four fillable columns of the grid (the day column is not fillable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GridColumn {
    Meals,
    Movement,
    SelfCare,
    Win,
}

impl GridColumn {
    pub const ALL: [GridColumn; 4] = [
        GridColumn::Meals,
        GridColumn::Movement,
        GridColumn::SelfCare,
        GridColumn::Win,
    ];

    /// Prefix used in field names.
    pub fn token(self) -> &'static str {
        match self {
            GridColumn::Meals => "Meals",
            GridColumn::Movement => "Movement",
            GridColumn::SelfCare => "SelfCare",
            GridColumn::Win => "Win",
        }
    }

    /// Text printed in the grid header row.
    pub fn heading(self) -> &'static str {
        match self {
            GridColumn::Meals => "Meals",
            GridColumn::Movement => "Movement",
            GridColumn::SelfCare => "Self-Care",
            GridColumn::Win => "Daily Win",
        }
    }
}

/// Every fillable field on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    WeekOf,
    Focus,
    Notes,
    Cell { column: GridColumn, day: Day },
    /// `row` and `slot` are 1-based.
    Habit { row: usize, slot: usize },
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::WeekOf => f.write_str("WeekOf"),
            FieldName::Focus => f.write_str("Focus"),
            FieldName::Notes => f.write_str("Notes"),
            FieldName::Cell { column, day } => write!(f, "{}_{}", column.token(), day.label()),
            FieldName::Habit { row, slot } => write!(f, "Habit_{}_{}", row, slot),
        }
    }
}

/// Role half of the string-keyed naming contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    WeekOf,
    Focus,
    Notes,
    Cell(GridColumn),
    Habit,
}

/// Name a field from its role, row label and index.
///
/// Grid cells need the day label (`"Mon"`..`"Sun"`); habit checkboxes need
/// the 1-based habit row as `row_label` and the 1-based slot as `index`.
/// Returns `None` when the label or index does not name a field that the
/// planner can contain.
pub fn name_for(role: FieldRole, row_label: Option<&str>, index: Option<usize>) -> Option<String> {
    let name = match role {
        FieldRole::WeekOf => FieldName::WeekOf,
        FieldRole::Focus => FieldName::Focus,
        FieldRole::Notes => FieldName::Notes,
        FieldRole::Cell(column) => FieldName::Cell {
            column,
            day: Day::from_label(row_label?)?,
        },
        FieldRole::Habit => {
            let row: usize = row_label?.parse().ok()?;
            let slot = index?;
            let habit = crate::layout::HABITS.get(row.checked_sub(1)?)?;
            if slot == 0 || slot > habit.count {
                return None;
            }
            FieldName::Habit { row, slot }
        }
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(FieldName::WeekOf.to_string(), "WeekOf");
        assert_eq!(
            FieldName::Cell { column: GridColumn::SelfCare, day: Day::Wed }.to_string(),
            "SelfCare_Wed"
        );
        assert_eq!(FieldName::Habit { row: 4, slot: 7 }.to_string(), "Habit_4_7");
    }

    #[test]
    fn test_name_for() {
        assert_eq!(name_for(FieldRole::Notes, None, None).as_deref(), Some("Notes"));
        assert_eq!(
            name_for(FieldRole::Cell(GridColumn::Meals), Some("Mon"), None).as_deref(),
            Some("Meals_Mon")
        );
        assert_eq!(name_for(FieldRole::Habit, Some("1"), Some(8)).as_deref(), Some("Habit_1_8"));
    }

    #[test]
    fn test_name_for_rejects_missing_slots() {
        assert_eq!(name_for(FieldRole::Cell(GridColumn::Win), Some("Funday"), None), None);
        assert_eq!(name_for(FieldRole::Cell(GridColumn::Win), None, None), None);
        assert_eq!(name_for(FieldRole::Habit, Some("1"), Some(9)), None);
        assert_eq!(name_for(FieldRole::Habit, Some("2"), Some(8)), None);
        assert_eq!(name_for(FieldRole::Habit, Some("0"), Some(1)), None);
        assert_eq!(name_for(FieldRole::Habit, Some("5"), Some(1)), None);
        assert_eq!(name_for(FieldRole::Habit, Some("1"), Some(0)), None);
    }
}
