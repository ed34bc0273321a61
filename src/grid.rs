//! Grid geometry: conversion between pixel space and cells, and toroidal wraparound.

use crate::types::{Cell, Direction, Pixel};

/// Wrap a pixel coordinate onto `[0, axis_size)`.
pub fn wrap(pixel: i32, axis_size: i32) -> i32 {
    pixel.rem_euclid(axis_size)
}

// Dimensions of the playing field; edges wrap to the opposite edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,     // Width in cells
    pub height: i32,    // Height in cells
    pub cell_size: i32, // Edge length of one cell in pixels
}

impl Grid {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Grid {
            width: width as i32,
            height: height as i32,
            cell_size: cell_size as i32,
        }
    }

    pub fn pixel_width(&self) -> i32 {
        self.width * self.cell_size
    }

    pub fn pixel_height(&self) -> i32 {
        self.height * self.cell_size
    }

    pub fn to_cell(&self, pixel: Pixel) -> Cell {
        Cell::new(
            pixel.x.div_euclid(self.cell_size),
            pixel.y.div_euclid(self.cell_size),
        )
    }

    pub fn to_pixel(&self, cell: Cell) -> Pixel {
        Pixel::new(cell.col * self.cell_size, cell.row * self.cell_size)
    }

    pub fn wrap_pixel(&self, pixel: Pixel) -> Pixel {
        Pixel::new(
            wrap(pixel.x, self.pixel_width()),
            wrap(pixel.y, self.pixel_height()),
        )
    }

    /// The cell one step away in `direction`, re-entering from the opposite edge.
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        let from = self.to_pixel(cell);
        let moved = Pixel::new(
            from.x + dx * self.cell_size,
            from.y + dy * self.cell_size,
        );
        self.to_cell(self.wrap_pixel(moved))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.col) && (0..self.height).contains(&cell.row)
    }
}
