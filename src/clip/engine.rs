use std::collections::BinaryHeap;

use super::active::{is_horizontal, set_dx, Active, ActiveIdx, ActiveList};
use super::intersect::IntersectNode;
use super::outrec::{point_count, OutPtList, OutRecFlags, OutRecIdx, OutRecList};
use super::polytree::PolyTree;
use super::vertex::{self, LocalMinIdx, LocalMinima, VertexFlags, VertexIdx, VertexList};
use super::{ClipType, FillRule, Path64, PathType, Paths64};
use crate::core::error::{ClipError, ClipResult};
use crate::core::math::{Point64, Rect64};

/// Flat clipping solution: closed output rings and clipped open paths.
#[derive(Debug, Clone, Default)]
pub struct BooleanSolution {
    pub closed_paths: Paths64,
    pub open_paths: Paths64,
}

/// Tree-shaped clipping solution recording ring containment, plus clipped
/// open paths.
#[derive(Debug, Clone)]
pub struct TreeSolution {
    pub tree: PolyTree,
    pub open_paths: Paths64,
}

/// Polygon clipping engine.
///
/// Subject and clip paths are added up front, then [execute](Clipper::execute)
/// sweeps them once per call. Inputs are retained between executes so the
/// same paths can be re-clipped under a different clip type or fill rule;
/// [clear](Clipper::clear) drops them.
///
/// # Examples
///
/// ```
/// # use polybool64::clip::{ClipType, Clipper, FillRule, PathType};
/// # use polybool64::path64;
/// let mut clipper = Clipper::new();
/// clipper.add_path(&path64![(0, 0), (10, 0), (10, 10), (0, 10)], PathType::Subject, false)?;
/// clipper.add_path(&path64![(5, 5), (15, 5), (15, 15), (5, 15)], PathType::Clip, false)?;
/// let solution = clipper.execute(ClipType::Intersection, FillRule::EvenOdd)?;
/// assert_eq!(solution.closed_paths.len(), 1);
/// # Ok::<(), polybool64::core::error::ClipError>(())
/// ```
#[derive(Debug, Default)]
pub struct Clipper {
    // inputs, retained across executes
    pub(crate) vertices: VertexList,
    pub(crate) minima: Vec<LocalMinima>,
    minima_sorted: bool,
    curr_loc_min: usize,
    pub(crate) has_open_paths: bool,

    // transient sweep state, reset after every execute
    pub(crate) actives: ActiveList,
    pub(crate) ael_first: Option<ActiveIdx>,
    pub(crate) sel_first: Option<ActiveIdx>,
    scanline_list: BinaryHeap<i64>,
    pub(crate) intersect_list: Vec<IntersectNode>,
    pub(crate) outrecs: OutRecList,
    pub(crate) outpts: OutPtList,

    pub(crate) clip_type: ClipType,
    pub(crate) fill_rule: FillRule,
    locked: bool,
}

impl Clipper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject or clip path. Open paths may only be subjects.
    ///
    /// Degenerate paths (fewer than two distinct points, or closed paths with
    /// zero area) are silently ignored.
    pub fn add_path(
        &mut self,
        path: &[Point64],
        polytype: PathType,
        is_open: bool,
    ) -> ClipResult<()> {
        if is_open {
            if polytype == PathType::Clip {
                return Err(ClipError::OpenClipPath);
            }
            self.has_open_paths = true;
        }
        self.minima_sorted = false;
        vertex::insert_path(&mut self.vertices, &mut self.minima, path, polytype, is_open);
        Ok(())
    }

    pub fn add_paths(
        &mut self,
        paths: &[Path64],
        polytype: PathType,
        is_open: bool,
    ) -> ClipResult<()> {
        for path in paths {
            self.add_path(path, polytype, is_open)?;
        }
        Ok(())
    }

    /// Drop all inputs.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.minima.clear();
        self.curr_loc_min = 0;
        self.minima_sorted = false;
        self.has_open_paths = false;
    }

    /// Bounding rectangle of all input paths, or a zero rect when empty.
    pub fn get_bounds(&self) -> Rect64 {
        if self.minima.is_empty() {
            return Rect64::new(0, 0, 0, 0);
        }
        let mut result = Rect64::new(i64::MAX, i64::MAX, i64::MIN, i64::MIN);
        for lm in &self.minima {
            let start = lm.vertex;
            let mut v = start;
            loop {
                result.expand_to(self.vertices[v].pt);
                v = self.vertices[v].next;
                if v == start {
                    break;
                }
            }
        }
        result
    }

    /// Clip the added paths, returning flat closed and open path lists.
    pub fn execute(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> ClipResult<BooleanSolution> {
        let swept = self.execute_internal(clip_type, fill_rule);
        let result = match swept {
            Ok(true) => {
                let mut solution = BooleanSolution::default();
                self.build_result(&mut solution.closed_paths, &mut solution.open_paths);
                Ok(solution)
            }
            Ok(false) => Ok(BooleanSolution::default()),
            Err(e) => Err(e),
        };
        self.clean_up();
        result
    }

    /// Clip the added paths, returning the closed rings as a containment
    /// tree alongside the clipped open paths.
    pub fn execute_tree(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> ClipResult<TreeSolution> {
        let swept = self.execute_internal(clip_type, fill_rule);
        let result = match swept {
            Ok(true) => {
                let mut tree = PolyTree::new();
                let mut open_paths = Paths64::new();
                self.build_tree_result(&mut tree, &mut open_paths);
                Ok(TreeSolution { tree, open_paths })
            }
            Ok(false) => Ok(TreeSolution {
                tree: PolyTree::new(),
                open_paths: Paths64::new(),
            }),
            Err(e) => Err(e),
        };
        self.clean_up();
        result
    }

    fn execute_internal(&mut self, clip_type: ClipType, fill_rule: FillRule) -> ClipResult<bool> {
        if self.locked {
            return Err(ClipError::EngineLocked);
        }
        self.locked = true;
        let result = self.sweep(clip_type, fill_rule);
        self.locked = false;
        result
    }

    fn sweep(&mut self, clip_type: ClipType, fill_rule: FillRule) -> ClipResult<bool> {
        self.clip_type = clip_type;
        self.fill_rule = fill_rule;
        self.reset();
        let Some(mut y) = self.pop_scanline() else {
            return Ok(false);
        };
        loop {
            self.insert_local_minima_into_ael(y)?;
            while let Some(horz) = self.pop_horz() {
                self.process_horizontal(horz)?;
            }
            // y moves to the top of the scanbeam
            let Some(top_y) = self.pop_scanline() else {
                break;
            };
            self.process_intersections(top_y)?;
            self.sel_first = None; // the SEL is reused to flag horizontals
            self.do_top_of_scanbeam(top_y)?;
            y = top_y;
        }
        Ok(true)
    }

    fn reset(&mut self) {
        if !self.minima_sorted {
            // lowest scanline first, which under the inverted axis means the
            // largest y
            let verts = &self.vertices;
            self.minima
                .sort_by(|a, b| verts[b.vertex].pt.y.cmp(&verts[a.vertex].pt.y));
            self.minima_sorted = true;
        }
        for lm in &self.minima {
            self.scanline_list.push(self.vertices[lm.vertex].pt.y);
        }
        self.curr_loc_min = 0;
        self.ael_first = None;
        self.sel_first = None;
    }

    pub(crate) fn insert_scanline(&mut self, y: i64) {
        self.scanline_list.push(y);
    }

    fn pop_scanline(&mut self) -> Option<i64> {
        let y = self.scanline_list.pop()?;
        while self.scanline_list.peek() == Some(&y) {
            self.scanline_list.pop(); // pop duplicates
        }
        Some(y)
    }

    fn pop_local_minima(&mut self, y: i64) -> Option<LocalMinIdx> {
        if self.curr_loc_min >= self.minima.len() {
            return None;
        }
        let lm = &self.minima[self.curr_loc_min];
        if self.vertices[lm.vertex].pt.y != y {
            return None;
        }
        let idx = LocalMinIdx(self.curr_loc_min as u32);
        self.curr_loc_min += 1;
        Some(idx)
    }

    pub(crate) fn is_hot(&self, e: ActiveIdx) -> bool {
        self.actives[e].outrec.is_some()
    }

    pub(crate) fn is_open_edge(&self, e: ActiveIdx) -> bool {
        self.minima[self.actives[e].local_min.0 as usize].is_open
    }

    pub(crate) fn polytype(&self, e: ActiveIdx) -> PathType {
        self.minima[self.actives[e].local_min.0 as usize].polytype
    }

    pub(crate) fn is_same_polytype(&self, e1: ActiveIdx, e2: ActiveIdx) -> bool {
        self.polytype(e1) == self.polytype(e2)
    }

    pub(crate) fn is_maxima(&self, e: ActiveIdx) -> bool {
        self.vertices[self.actives[e].vertex_top]
            .flags
            .contains(VertexFlags::LOCAL_MAX)
    }

    /// Next vertex along the edge's bound, following the winding direction.
    pub(crate) fn next_vertex(&self, e: ActiveIdx) -> VertexIdx {
        let vt = self.actives[e].vertex_top;
        if self.actives[e].wind_dx > 0 {
            self.vertices[vt].next
        } else {
            self.vertices[vt].prev
        }
    }

    fn new_bound(&mut self, lm_idx: LocalMinIdx, descending: bool) -> ActiveIdx {
        let lm = self.minima[lm_idx.0 as usize];
        let bot = self.vertices[lm.vertex].pt;
        let (vertex_top, wind_dx) = if descending {
            (self.vertices[lm.vertex].prev, -1)
        } else {
            (self.vertices[lm.vertex].next, 1)
        };
        let mut edge = Active {
            bot,
            curr: bot,
            top: self.vertices[vertex_top].pt,
            dx: 0.0,
            wind_dx,
            wind_cnt: 0,
            wind_cnt2: 0,
            outrec: None,
            next_in_ael: None,
            prev_in_ael: None,
            next_in_sel: None,
            prev_in_sel: None,
            merge_jump: None,
            vertex_top,
            local_min: lm_idx,
        };
        set_dx(&mut edge);
        self.actives.push(edge)
    }

    /// Drain every local minimum resting on the scanline `bot_y` and insert
    /// its bounds into the AEL.
    fn insert_local_minima_into_ael(&mut self, bot_y: i64) -> ClipResult<()> {
        while let Some(lm_idx) = self.pop_local_minima(bot_y) {
            let lm = self.minima[lm_idx.0 as usize];
            let vflags = self.vertices[lm.vertex].flags;

            let mut left_bound = if vflags.contains(VertexFlags::OPEN_START) {
                None
            } else {
                Some(self.new_bound(lm_idx, true))
            };
            let mut right_bound = if vflags.contains(VertexFlags::OPEN_END) {
                None
            } else {
                Some(self.new_bound(lm_idx, false))
            };

            // left is currently just the descending bound and right the
            // ascending one; swap whenever left isn't actually to the left
            if let (Some(l), Some(r)) = (left_bound, right_bound) {
                let al = &self.actives[l];
                let ar = &self.actives[r];
                let swap = if is_horizontal(al) {
                    al.top.x > al.bot.x
                } else {
                    al.dx < ar.dx
                };
                if swap {
                    left_bound = Some(r);
                    right_bound = Some(l);
                }
            } else if left_bound.is_none() {
                left_bound = right_bound;
                right_bound = None;
            }
            let Some(left) = left_bound else {
                continue;
            };

            self.insert_edge_into_ael(left, None, false);
            let contributing = if self.is_open_edge(left) {
                self.set_winding_left_edge_open(left);
                self.is_contributing_open(left)
            } else {
                self.set_winding_left_edge_closed(left);
                self.is_contributing_closed(left)
            };

            if let Some(right) = right_bound {
                self.actives[right].wind_cnt = self.actives[left].wind_cnt;
                self.actives[right].wind_cnt2 = self.actives[left].wind_cnt2;
                self.insert_edge_into_ael(right, Some(left), false);
                if contributing {
                    let bot = self.actives[left].bot;
                    self.add_local_min_poly(left, right, bot);
                }
                if is_horizontal(&self.actives[right]) {
                    self.push_horz(right);
                } else {
                    let top_y = self.actives[right].top.y;
                    self.insert_scanline(top_y);
                }
            } else if contributing {
                let bot = self.actives[left].bot;
                self.start_open_path(left, bot);
            }

            if is_horizontal(&self.actives[left]) {
                self.push_horz(left);
            } else {
                let top_y = self.actives[left].top.y;
                self.insert_scanline(top_y);
            }

            if let Some(right) = right_bound {
                if self.actives[left].next_in_ael != Some(right) {
                    // the freshly inserted right bound crosses each edge caught
                    // between the two bounds at its own bottom point; the right
                    // bound stays to the right of each above the crossing
                    let bot = self.actives[right].bot;
                    let mut e = self.actives[left].next_in_ael;
                    while let Some(c) = e {
                        if c == right {
                            break;
                        }
                        self.intersect_edges(right, c, bot)?;
                        e = self.actives[c].next_in_ael;
                    }
                }
            }
        }
        Ok(())
    }

    fn build_result(&self, closed: &mut Paths64, open: &mut Paths64) {
        closed.reserve(self.outrecs.len());
        for i in 0..self.outrecs.len() {
            let or = OutRecIdx(i as u32);
            let Some(pts) = self.outrecs[or].pts else {
                continue;
            };
            let op_start = self.outpts[pts].prev;
            let mut cnt = point_count(&self.outpts, op_start);
            // the start and end points may duplicate
            if self.outpts[op_start].pt == self.outpts[pts].pt {
                cnt -= 1;
            }
            let is_open = self.outrecs[or].flags.contains(OutRecFlags::OPEN);
            if cnt < 2 || (!is_open && cnt == 2) {
                continue;
            }
            let mut path = Path64::with_capacity(cnt);
            let mut op = op_start;
            for _ in 0..cnt {
                path.push(self.outpts[op].pt);
                op = self.outpts[op].prev;
            }
            if is_open {
                open.push(path);
            } else {
                closed.push(path);
            }
        }
    }

    fn build_tree_result(&mut self, tree: &mut PolyTree, open: &mut Paths64) {
        for i in 0..self.outrecs.len() {
            let or = OutRecIdx(i as u32);
            let Some(pts) = self.outrecs[or].pts else {
                continue;
            };
            let op_start = self.outpts[pts].prev;
            let mut cnt = point_count(&self.outpts, op_start);
            if self.outpts[op_start].pt == self.outpts[pts].pt {
                cnt -= 1;
            }
            let is_open = self.outrecs[or].flags.contains(OutRecFlags::OPEN);
            if cnt < 2 || (!is_open && cnt == 2) {
                continue;
            }
            let mut path = Path64::with_capacity(cnt);
            let mut op = op_start;
            for _ in 0..cnt {
                path.push(self.outpts[op].pt);
                op = self.outpts[op].prev;
            }
            if is_open {
                open.push(path);
                continue;
            }
            let parent = match self.outrecs[or].owner.and_then(|o| self.outrecs[o].polypath) {
                Some(pp) => pp,
                None => tree.root(),
            };
            let node = tree.add_child(parent, path);
            self.outrecs[or].polypath = Some(node);
        }
    }

    /// Release all transient sweep structures, retaining the input vertex
    /// rings and local minima.
    fn clean_up(&mut self) {
        while let Some(head) = self.ael_first {
            self.delete_from_ael(head);
        }
        self.actives.clear();
        self.sel_first = None;
        self.scanline_list.clear();
        self.intersect_list.clear();
        self.outpts.clear();
        self.outrecs.clear();
    }
}
