//! Terminal tables.

use std::{io, ops::Range};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use smallvec::SmallVec;
use storefront::presentation::{ColorToken, Presentation};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::cli::CliError;

const PROGRESS_BAR_WIDTH: usize = 20;

/// A table being assembled row by row.
pub(crate) struct Report {
    builder: Builder,
    colors: SmallVec<[(usize, usize, ColorToken); 16]>,
    numeric: Option<Range<usize>>,
    rows: usize,
}

impl Report {
    pub(crate) fn new<const N: usize>(header: [&str; N]) -> Self {
        let mut builder = Builder::default();

        builder.push_record(header);

        Self {
            builder,
            colors: SmallVec::new(),
            numeric: None,
            rows: 1, // header is row 0
        }
    }

    /// Appends a row and returns its index.
    pub(crate) fn row<const N: usize>(&mut self, cells: [String; N]) -> usize {
        self.builder.push_record(cells);
        self.rows += 1;

        self.rows - 1
    }

    pub(crate) fn color(&mut self, row: usize, column: usize, color: ColorToken) {
        self.colors.push((row, column, color));
    }

    /// Right-aligns the given columns.
    pub(crate) fn numeric(mut self, columns: Range<usize>) -> Self {
        self.numeric = Some(columns);
        self
    }

    pub(crate) fn write_to(self, out: &mut impl io::Write) -> Result<(), CliError> {
        let mut table = self.builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);

        if let Some(columns) = self.numeric {
            table.modify(Columns::new(columns), Alignment::right());
        }

        for (row, column, color) in self.colors {
            table.modify((row, column), Color::new(color.ansi(), "\x1b[0m"));
        }

        writeln!(out, "{table}").map_err(CliError::Output)
    }
}

/// `name` cell text for a presentation, e.g. `Gold (trophy)`.
pub(crate) fn label(presentation: Presentation) -> String {
    format!("{} ({})", presentation.display_name, presentation.icon)
}

/// Fixed-width progress bar followed by the percentage.
pub(crate) fn progress_bar(percentage: Decimal) -> String {
    let filled = (percentage * Decimal::from(PROGRESS_BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(PROGRESS_BAR_WIDTH);

    format!(
        "{}{} {}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled),
        percentage.round_dp(2)
    )
}
