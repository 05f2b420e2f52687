//! Terminal presenters.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use wandering_core::{ActorColor, CellCoord, GridSpec, StatsSummary};
use wandering_rendering::{BoardState, Presenter, SummaryReport};

/// Draws the board as a block of ASCII glyphs, one line per row.
#[derive(Debug)]
pub(crate) struct TextPresenter<W> {
    out: W,
    frame: u64,
}

impl<W: Write> TextPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, frame: 0 }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, grid: &GridSpec, board: &BoardState) -> AnyResult<()> {
        let mut frame = String::new();
        for row in 0..grid.rows() {
            let line: Vec<String> = (0..grid.columns())
                .map(|column| {
                    board
                        .occupant_at(CellCoord::new(column, row))
                        .map_or('.', glyph)
                        .to_string()
                })
                .collect();
            frame.push_str(&line.join(" "));
            frame.push('\n');
        }

        writeln!(self.out, "Tick {}", self.frame)?;
        writeln!(self.out, "{frame}")?;
        self.out.flush().context("failed to flush board frame")?;
        self.frame += 1;
        Ok(())
    }

    fn present_round(&mut self, round: usize, moves: u32, survivors: usize) -> AnyResult<()> {
        writeln!(
            self.out,
            "Round {round} ended after {moves} moves; {survivors} players left."
        )?;
        Ok(())
    }

    fn present_summary(&mut self, summary: &StatsSummary) -> AnyResult<()> {
        writeln!(self.out, "Game over!")?;
        self.report(summary)
    }

    fn present_stopped(&mut self, ticks: u64, summary: &StatsSummary) -> AnyResult<()> {
        writeln!(self.out, "Game stopped after {ticks} ticks without everyone meeting.")?;
        self.report(summary)
    }
}

impl<W: Write> TextPresenter<W> {
    fn report(&mut self, summary: &StatsSummary) -> AnyResult<()> {
        writeln!(self.out, "{}", SummaryReport(summary))?;
        writeln!(self.out)?;
        self.frame = 0;
        Ok(())
    }
}

/// Emits one JSON summary line per game and nothing else.
#[derive(Debug)]
pub(crate) struct JsonPresenter<W> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, _grid: &GridSpec, _board: &BoardState) -> AnyResult<()> {
        Ok(())
    }

    fn present_summary(&mut self, summary: &StatsSummary) -> AnyResult<()> {
        serde_json::to_writer(&mut self.out, summary).context("failed to encode summary")?;
        writeln!(self.out)?;
        Ok(())
    }
}

fn glyph(color: ActorColor) -> char {
    match color {
        ActorColor::Red => 'R',
        ActorColor::Blue => 'B',
        ActorColor::Green => 'G',
        ActorColor::Yellow => 'Y',
        ActorColor::Purple => 'P',
        ActorColor::Orange => 'O',
        ActorColor::Cyan => 'C',
        ActorColor::Black => 'K',
    }
}
