//! Horizontal stacked bars of top earners, one segment per tournament.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::charts::axis::linear_ticks;
use crate::charts::format::{format_money, format_si};
use crate::charts::palette::{GRID_COLOR, OTHERS_KEY, segment_color};
use crate::charts::tooltip::{PlacementBadge, Tooltip, TooltipContent, TooltipPosition};
use crate::core::{
    BandScale, ChartDimensions, EntryIndex, LinearScale, Margins, StackedSeries, TopEarnerTable,
    stack_extent, stack_series,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, ImagePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

/// Trophy icon sequence shown next to the top-earner rows.
pub const DEFAULT_ROW_ICON_SEQUENCE: [u8; 10] = [7, 7, 7, 7, 5, 5, 5, 7, 5, 6];

#[must_use]
pub fn default_row_icons() -> Vec<String> {
    DEFAULT_ROW_ICON_SEQUENCE
        .iter()
        .map(|n| format!("./img/ti{n}_icon.png"))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedBarConfig {
    pub height: f64,
    pub margins: Margins,
    pub band_padding: f64,
    pub x_tick_count: usize,
    pub separator_width: f64,
    /// Image per row, top to bottom; rows without one get no icon.
    pub row_icons: Vec<String>,
    pub icon_size: f64,
    pub icon_offset_y: f64,
}

impl Default for StackedBarConfig {
    fn default() -> Self {
        Self {
            height: 500.0,
            margins: Margins::new(150.0, 0.0, 20.0, 20.0),
            band_padding: 0.4,
            x_tick_count: 10,
            separator_width: 1.5,
            row_icons: Vec::new(),
            icon_size: 25.0,
            icon_offset_y: 20.0,
        }
    }
}

impl StackedBarConfig {
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_row_icons(mut self, row_icons: Vec<String>) -> Self {
        self.row_icons = row_icons;
        self
    }
}

/// One drawn segment in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub key: String,
    pub row_label: String,
    pub row_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
    pub color: Color,
}

impl BarSegment {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone)]
pub struct StackedBarChart {
    config: StackedBarConfig,
    dims: ChartDimensions,
    table: TopEarnerTable,
    series: Vec<StackedSeries>,
    index: EntryIndex,
    x_scale: LinearScale,
    y_scale: BandScale,
}

impl StackedBarChart {
    /// Stacks `table` and fits scales for `width` pixels.
    ///
    /// `index` resolves a player's result at a tournament for colors and
    /// tooltip badges.
    pub fn new(
        table: TopEarnerTable,
        index: EntryIndex,
        width: f64,
        config: StackedBarConfig,
    ) -> ChartResult<Self> {
        let dims = ChartDimensions::new(width, config.height, config.margins)?;
        let series = stack_series(&table.rows, &table.keys)?;
        let (lo, hi) = stack_extent(&series).ok_or_else(|| {
            ChartError::InvalidData("stacked bar needs at least one row and key".to_owned())
        })?;
        let x_scale = LinearScale::new((lo, hi), (0.0, dims.inner_width()))?;
        let y_scale = BandScale::new(
            table.rows.len(),
            (0.0, dims.inner_height()),
            config.band_padding,
        )?;
        debug!(
            rows = table.rows.len(),
            keys = table.keys.len(),
            max_total = hi,
            "stacked bar initialized"
        );

        Ok(Self {
            config,
            dims,
            table,
            series,
            index,
            x_scale,
            y_scale,
        })
    }

    #[must_use]
    pub fn dimensions(&self) -> ChartDimensions {
        self.dims
    }

    #[must_use]
    pub fn series(&self) -> &[StackedSeries] {
        &self.series
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.table.labels()
    }

    /// Visible segments, series by series, in plot coordinates.
    pub fn segments(&self) -> ChartResult<Vec<BarSegment>> {
        let mut segments = Vec::new();
        for series in &self.series {
            for (row_index, segment) in series.segments.iter().enumerate() {
                if segment.is_empty() {
                    continue;
                }
                let top = self.y_scale.position(row_index).ok_or_else(|| {
                    ChartError::InvalidData(format!("no band for row {row_index}"))
                })?;
                let x0 = self.x_scale.map(segment.start)?;
                let x1 = self.x_scale.map(segment.end)?;
                segments.push(BarSegment {
                    key: series.key.clone(),
                    row_label: segment.row_label.clone(),
                    row_index,
                    x: x0.min(x1),
                    y: top,
                    width: (x1 - x0).abs(),
                    height: self.y_scale.bandwidth(),
                    value: segment.value,
                    color: self.segment_fill(&segment.row_label, &series.key),
                });
            }
        }
        Ok(segments)
    }

    fn segment_fill(&self, player_id: &str, tournament: &str) -> Color {
        let entry = self.index.lookup(player_id, tournament);
        if entry.is_none() && tournament != OTHERS_KEY {
            warn!(player_id, tournament, "no entry for bar segment; using default color");
        }
        segment_color(tournament, entry)
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let margins = self.dims.margins;
        let inner_height = self.dims.inner_height();
        let mut frame = RenderFrame::new(self.dims.viewport());

        let (lo, hi) = self.x_scale.domain();
        for (i, tick) in linear_ticks(lo, hi, self.config.x_tick_count)
            .into_iter()
            .enumerate()
        {
            let x = margins.left + self.x_scale.map(tick)?;
            if i > 0 {
                frame.lines.push(
                    LinePrimitive::new(x, margins.top, x, margins.top + inner_height, 2.0, GRID_COLOR)
                        .dashed(6.0),
                );
            }
            frame.texts.push(TextPrimitive::new(
                format_si(tick),
                x,
                margins.top + inner_height + 18.0,
                14.0,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }

        for segment in self.segments()? {
            let x = margins.left + segment.x;
            let y = margins.top + segment.y;
            frame.rects.push(RectPrimitive::new(
                x,
                y,
                segment.width,
                segment.height,
                segment.color,
            ));
            frame.lines.push(LinePrimitive::new(
                x + 0.5,
                y,
                x + 0.5,
                y + segment.height,
                self.config.separator_width,
                Color::WHITE,
            ));
        }

        frame.lines.push(LinePrimitive::new(
            margins.left,
            margins.top,
            margins.left,
            margins.top + inner_height,
            1.0,
            Color::BLACK,
        ));

        for (row_index, row) in self.table.rows.iter().enumerate() {
            let Some(center) = self.y_scale.center(row_index) else {
                continue;
            };
            if !row.player_id.is_empty() {
                frame.texts.push(
                    TextPrimitive::new(
                        row.player_id.clone(),
                        margins.left - 9.0,
                        margins.top + center + 5.0,
                        15.0,
                        Color::BLACK,
                        TextHAlign::Right,
                    )
                    .bold(),
                );
            }
            if let (Some(icon), Some(top)) = (
                self.config.row_icons.get(row_index),
                self.y_scale.position(row_index),
            ) {
                frame.images.push(ImagePrimitive::new(
                    icon.clone(),
                    0.0,
                    top + self.config.icon_offset_y,
                    self.config.icon_size,
                    self.config.icon_size,
                ));
            }
        }

        Ok(frame)
    }

    /// Segment under a pointer given in plot coordinates.
    pub fn segment_at(&self, pointer_x: f64, pointer_y: f64) -> ChartResult<Option<BarSegment>> {
        Ok(self
            .segments()?
            .into_iter()
            .find(|segment| segment.contains(pointer_x, pointer_y)))
    }

    /// Tooltip for the segment under the pointer, placed at the pointer.
    pub fn tooltip_at(&self, pointer_x: f64, pointer_y: f64) -> ChartResult<Option<Tooltip>> {
        let Some(segment) = self.segment_at(pointer_x, pointer_y)? else {
            return Ok(None);
        };

        let badge = if segment.key == OTHERS_KEY {
            PlacementBadge::blank()
        } else {
            match self.index.lookup(&segment.row_label, &segment.key) {
                Some(entry) => PlacementBadge::for_entry(entry),
                None => {
                    warn!(
                        player_id = %segment.row_label,
                        tournament = %segment.key,
                        "no entry for tooltip badge"
                    );
                    PlacementBadge::blank()
                }
            }
        };

        let value = self
            .table
            .rows
            .get(segment.row_index)
            .map(|row| row.value(&segment.key))
            .unwrap_or_default();

        let margins = self.dims.margins;
        Ok(Some(Tooltip {
            content: TooltipContent {
                title: segment.key.clone(),
                date_label: None,
                team: None,
                badge,
                value_label: format_money(value),
            },
            position: TooltipPosition::at(pointer_x + margins.left, pointer_y + margins.top),
        }))
    }
}
