// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Calendar grid aligned to the weekly layout of a contribution graph.
//!
//! The graph renders one column per week with Sunday on row 0 and Saturday
//! on row 6. [`build_grid`] produces the contiguous run of dates that fills
//! whole week columns inside a given year, and [`grid_index`] flattens a
//! `(row, column)` cell into a position inside that run.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::Error;

/// Number of rows in a week column.
pub const DAYS_PER_WEEK: usize = 7;

/// Returns the offset of the `(row, column)` cell in a column-major grid.
///
/// Column `c` occupies positions `c * 7 ..= c * 7 + 6`, so the flattened
/// order matches the calendar order of a [`CalendarGrid`].
///
/// # Examples
///
/// ```
/// use graphpaint::grid_index;
///
/// assert_eq!(grid_index(0, 0), 0);
/// assert_eq!(grid_index(6, 0), 6);
/// assert_eq!(grid_index(0, 1), 7);
/// assert_eq!(grid_index(3, 2), 17);
/// ```
pub const fn grid_index(row: usize, column: usize,) -> usize
{
    row + column * DAYS_PER_WEEK
}

/// Contiguous run of dates covering whole Sunday..Saturday weeks.
///
/// Invariants: the first date is a Sunday, the last a Saturday, every date
/// is the previous one plus a day, and the length is a multiple of 7.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct CalendarGrid
{
    year:  i32,
    dates: Vec<NaiveDate,>,
}

impl CalendarGrid
{
    /// Year the grid was built for.
    pub fn year(&self,) -> i32
    {
        self.year
    }

    /// All dates in increasing order.
    pub fn dates(&self,) -> &[NaiveDate]
    {
        &self.dates
    }

    /// Number of dates in the grid.
    pub fn len(&self,) -> usize
    {
        self.dates.len()
    }

    /// Returns `true` when the grid holds no dates. Never the case for a
    /// grid produced by [`build_grid`].
    pub fn is_empty(&self,) -> bool
    {
        self.dates.is_empty()
    }

    /// Number of week columns.
    pub fn columns(&self,) -> usize
    {
        self.dates.len() / DAYS_PER_WEEK
    }

    /// Date displayed in the given cell, if the cell lies inside the grid.
    pub fn date_at(&self, row: usize, column: usize,) -> Option<NaiveDate,>
    {
        if row >= DAYS_PER_WEEK {
            return None;
        }
        self.dates.get(grid_index(row, column,),).copied()
    }

    /// Returns the dates of the first `width` week columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when `width` is zero or the
    /// year has fewer full week columns than requested.
    pub fn leading_columns(&self, width: u32,) -> Result<&[NaiveDate], Error,>
    {
        let requested = width as usize;
        if requested == 0 || requested > self.columns() {
            return Err(Error::DimensionMismatch {
                width,
                height: DAYS_PER_WEEK as u32,
                requirement: format!(
                    "year {} only has {} full week columns",
                    self.year,
                    self.columns()
                ),
            },);
        }

        Ok(&self.dates[..requested * DAYS_PER_WEEK],)
    }
}

/// Builds the calendar grid for `year`.
///
/// The grid starts on the first Sunday of the year, or on January 8 when
/// January 1 is itself a Sunday, and ends on the last Saturday on or before
/// December 31.
///
/// # Errors
///
/// Returns [`Error::Validation`] for years outside the range supported by
/// [`chrono::NaiveDate`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use graphpaint::build_grid;
///
/// let grid = build_grid(2024,).expect("valid year",);
/// assert_eq!(grid.dates()[0], NaiveDate::from_ymd_opt(2024, 1, 7,).unwrap());
/// assert_eq!(grid.len(), 357);
/// ```
pub fn build_grid(year: i32,) -> Result<CalendarGrid, Error,>
{
    let out_of_range = || Error::validation(format!("year {year} is outside the supported range"),);

    let january_first = NaiveDate::from_ymd_opt(year, 1, 1,).ok_or_else(out_of_range,)?;
    let december_last = NaiveDate::from_ymd_opt(year, 12, 31,).ok_or_else(out_of_range,)?;

    let mut lead = (7 - january_first.weekday().num_days_from_sunday()) % 7;
    if lead == 0 {
        lead = 7;
    }
    let first_sunday =
        january_first.checked_add_days(Days::new(u64::from(lead,),),).ok_or_else(out_of_range,)?;

    let trail = (december_last.weekday().num_days_from_sunday() + 1) % 7;
    let last_saturday = december_last
        .checked_sub_days(Days::new(u64::from(trail,),),)
        .ok_or_else(out_of_range,)?;

    let span = (last_saturday - first_sunday).num_days() + 1;
    let dates: Vec<NaiveDate,> = first_sunday.iter_days().take(span as usize,).collect();

    Ok(CalendarGrid {
        year,
        dates,
    },)
}
