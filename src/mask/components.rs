use crate::image::{ImageView, Mask};
use std::collections::VecDeque;

/// Bounding box (inclusive) and pixel count of one labelled component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentStats {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub area: usize,
}

/// Label image of an 8-connected labelling. Label `0` is background and
/// label `k > 0` is described by `stats[k - 1]`. Labels follow raster order
/// of each component's first pixel.
#[derive(Clone, Debug)]
pub struct ComponentLabels {
    w: usize,
    h: usize,
    labels: Vec<u32>,
    pub stats: Vec<ComponentStats>,
}

impl ComponentLabels {
    /// Number of foreground components.
    pub fn count(&self) -> usize {
        self.stats.len()
    }

    #[inline]
    pub fn label_at(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.w + x]
    }

    /// Flags indexed by label: `true` when the component touches any edge.
    pub fn touches_border(&self) -> Vec<bool> {
        let mut flags = vec![false; self.stats.len() + 1];
        if self.w == 0 || self.h == 0 {
            return flags;
        }
        for x in 0..self.w {
            flags[self.label_at(x, 0) as usize] = true;
            flags[self.label_at(x, self.h - 1) as usize] = true;
        }
        for y in 0..self.h {
            flags[self.label_at(0, y) as usize] = true;
            flags[self.label_at(self.w - 1, y) as usize] = true;
        }
        flags[0] = false;
        flags
    }

    /// Mask of pixels whose component satisfies `keep(label, stats)`.
    pub fn select(&self, mut keep: impl FnMut(u32, &ComponentStats) -> bool) -> Mask {
        let mut table = vec![false; self.stats.len() + 1];
        for (i, st) in self.stats.iter().enumerate() {
            let label = i as u32 + 1;
            table[label as usize] = keep(label, st);
        }
        Mask::from_vec(
            self.w,
            self.h,
            self.labels.iter().map(|&l| table[l as usize]).collect(),
        )
    }
}

/// Label the 8-connected components of `mask` with a breadth-first flood fill.
pub fn label_components(mask: &Mask) -> ComponentLabels {
    let (w, h) = (mask.width(), mask.height());
    let mut labels = vec![0u32; w * h];
    let mut stats = Vec::new();
    let mut queue = VecDeque::new();

    for y0 in 0..h {
        for x0 in 0..w {
            if !mask.get(x0, y0) || labels[y0 * w + x0] != 0 {
                continue;
            }
            let label = stats.len() as u32 + 1;
            let mut st = ComponentStats {
                left: x0,
                top: y0,
                right: x0,
                bottom: y0,
                area: 0,
            };
            labels[y0 * w + x0] = label;
            queue.push_back((x0, y0));
            while let Some((x, y)) = queue.pop_front() {
                st.area += 1;
                st.left = st.left.min(x);
                st.right = st.right.max(x);
                st.top = st.top.min(y);
                st.bottom = st.bottom.max(y);
                for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                    for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                        let idx = ny * w + nx;
                        if labels[idx] == 0 && mask.get(nx, ny) {
                            labels[idx] = label;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }
            stats.push(st);
        }
    }

    ComponentLabels { w, h, labels, stats }
}

/// Pixels of `mask` belonging to components that touch the image border.
pub fn border_connected(mask: &Mask) -> Mask {
    if !mask.any() {
        return Mask::new(mask.width(), mask.height());
    }
    let labels = label_components(mask);
    let border = labels.touches_border();
    labels.select(|label, _| border[label as usize])
}

/// Drop components smaller than `min_area` pixels. `min_area <= 1` is a no-op.
pub fn remove_small_components(mask: &Mask, min_area: usize) -> Mask {
    if min_area <= 1 || !mask.any() {
        return mask.clone();
    }
    label_components(mask).select(|_, st| st.area >= min_area)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> Mask {
        let h = rows.len();
        let w = rows[0].len();
        Mask::from_fn(w, h, |x, y| rows[y].as_bytes()[x] == b'#')
    }

    #[test]
    fn diagonal_neighbours_share_a_label() {
        let mask = mask_from(&["#...", ".#..", "...#", "...#"]);
        let labels = label_components(&mask);
        assert_eq!(labels.count(), 2);
        assert_eq!(labels.label_at(0, 0), labels.label_at(1, 1));
        assert_eq!(
            labels.stats[1],
            ComponentStats {
                left: 3,
                top: 2,
                right: 3,
                bottom: 3,
                area: 2
            }
        );
    }

    #[test]
    fn border_components_are_selected() {
        let mask = mask_from(&["##....", "......", "..##..", "..##..", "......", ".....#"]);
        let border = border_connected(&mask);
        assert!(border.get(0, 0) && border.get(1, 0) && border.get(5, 5));
        assert!(!border.get(2, 2));
        assert_eq!(border.count(), 3);
    }

    #[test]
    fn small_components_are_removed() {
        let mask = mask_from(&["#.....", "......", "..###.", "..###.", "......"]);
        let cleaned = remove_small_components(&mask, 2);
        assert!(!cleaned.get(0, 0));
        assert_eq!(cleaned.count(), 6);
        assert_eq!(remove_small_components(&mask, 1), mask);
    }
}
