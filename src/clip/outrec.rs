use super::active::{is_horizontal, ActiveIdx};
use super::engine::Clipper;
use super::polytree::PolyNodeIdx;
use crate::core::error::{ClipError, ClipResult};
use crate::core::math::Point64;
use std::ops::{Index, IndexMut};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct OutRecFlags: u8 {
        const OPEN = 1;
        /// Set when the ring is an outer boundary; clear for holes. Alternates
        /// with nesting depth.
        const OUTER = 2;
    }
}

/// Index of an [OutPt] in the engine's output point arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutPtIdx(pub(crate) u32);

/// Index of an [OutRec] in the engine's output ring list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutRecIdx(pub(crate) u32);

/// Node in a circular doubly linked ring of output points.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutPt {
    pub pt: Point64,
    pub next: OutPtIdx,
    pub prev: OutPtIdx,
}

/// A path in the clipping solution under construction.
///
/// While the ring is in progress both sides are bound to AEL edges: `pts`
/// is the head associated with `start_edge`, `pts.prev` the tail associated
/// with `end_edge`. Open rings may have one side unbound.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutRec {
    pub owner: Option<OutRecIdx>,
    pub pts: Option<OutPtIdx>,
    pub start_edge: Option<ActiveIdx>,
    pub end_edge: Option<ActiveIdx>,
    pub flags: OutRecFlags,
    pub polypath: Option<PolyNodeIdx>,
}

#[derive(Debug, Default)]
pub(crate) struct OutPtList {
    pts: Vec<OutPt>,
}

impl OutPtList {
    pub fn push(&mut self, op: OutPt) -> OutPtIdx {
        let idx = OutPtIdx(self.pts.len() as u32);
        self.pts.push(op);
        idx
    }

    /// Create a new single-point ring linked to itself.
    pub fn push_ring(&mut self, pt: Point64) -> OutPtIdx {
        let idx = OutPtIdx(self.pts.len() as u32);
        self.pts.push(OutPt {
            pt,
            next: idx,
            prev: idx,
        });
        idx
    }

    pub fn clear(&mut self) {
        self.pts.clear();
    }
}

impl Index<OutPtIdx> for OutPtList {
    type Output = OutPt;

    #[inline]
    fn index(&self, index: OutPtIdx) -> &OutPt {
        &self.pts[index.0 as usize]
    }
}

impl IndexMut<OutPtIdx> for OutPtList {
    #[inline]
    fn index_mut(&mut self, index: OutPtIdx) -> &mut OutPt {
        &mut self.pts[index.0 as usize]
    }
}

#[derive(Debug, Default)]
pub(crate) struct OutRecList {
    recs: Vec<OutRec>,
}

impl OutRecList {
    pub fn push(&mut self, rec: OutRec) -> OutRecIdx {
        let idx = OutRecIdx(self.recs.len() as u32);
        self.recs.push(rec);
        idx
    }

    pub fn len(&self) -> usize {
        self.recs.len()
    }

    pub fn clear(&mut self) {
        self.recs.clear();
    }
}

impl Index<OutRecIdx> for OutRecList {
    type Output = OutRec;

    #[inline]
    fn index(&self, index: OutRecIdx) -> &OutRec {
        &self.recs[index.0 as usize]
    }
}

impl IndexMut<OutRecIdx> for OutRecList {
    #[inline]
    fn index_mut(&mut self, index: OutRecIdx) -> &mut OutRec {
        &mut self.recs[index.0 as usize]
    }
}

/// Reverse the next/prev links of every point in the ring containing `pp`.
pub(crate) fn reverse_out_pt_links(outpts: &mut OutPtList, pp: OutPtIdx) {
    let mut p1 = pp;
    loop {
        let p2 = outpts[p1].next;
        outpts[p1].next = outpts[p1].prev;
        outpts[p1].prev = p2;
        p1 = p2;
        if p1 == pp {
            break;
        }
    }
}

pub(crate) fn point_count(outpts: &OutPtList, op: OutPtIdx) -> usize {
    let mut cnt = 0;
    let mut p = op;
    loop {
        cnt += 1;
        p = outpts[p].next;
        if p == op {
            break;
        }
    }
    cnt
}

impl Clipper {
    pub(crate) fn is_start_side(&self, e: ActiveIdx) -> bool {
        match self.actives[e].outrec {
            Some(or) => self.outrecs[or].start_edge == Some(e),
            None => false,
        }
    }

    fn set_outrec_sides(&mut self, outrec: OutRecIdx, start: ActiveIdx, end: ActiveIdx) {
        self.outrecs[outrec].start_edge = Some(start);
        self.outrecs[outrec].end_edge = Some(end);
        self.actives[start].outrec = Some(outrec);
        self.actives[end].outrec = Some(outrec);
    }

    /// Find the OutRec enclosing a ring that starts at edge `e`, by scanning
    /// the AEL for the nearest hot closed edge.
    pub(crate) fn get_owner(&self, e: ActiveIdx) -> Option<OutRecIdx> {
        if is_horizontal(&self.actives[e]) && self.actives[e].top.x < self.actives[e].bot.x {
            let mut cur = self.actives[e].next_in_ael;
            while let Some(c) = cur {
                if let Some(or) = self.actives[c].outrec {
                    if !self.is_open_edge(c) {
                        let outer = self.outrecs[or].flags.contains(OutRecFlags::OUTER);
                        return if outer == (self.outrecs[or].start_edge == Some(c)) {
                            self.outrecs[or].owner
                        } else {
                            Some(or)
                        };
                    }
                }
                cur = self.actives[c].next_in_ael;
            }
            None
        } else {
            let mut cur = self.actives[e].prev_in_ael;
            while let Some(c) = cur {
                if let Some(or) = self.actives[c].outrec {
                    if !self.is_open_edge(c) {
                        let outer = self.outrecs[or].flags.contains(OutRecFlags::OUTER);
                        return if outer == (self.outrecs[or].end_edge == Some(c)) {
                            self.outrecs[or].owner
                        } else {
                            Some(or)
                        };
                    }
                }
                cur = self.actives[c].prev_in_ael;
            }
            None
        }
    }

    /// Open a new output ring where edges `e1` and `e2` meet at a local
    /// minimum.
    pub(crate) fn add_local_min_poly(&mut self, e1: ActiveIdx, e2: ActiveIdx, pt: Point64) {
        let owner = self.get_owner(e1);
        let mut flags = if owner.is_some_and(|o| self.outrecs[o].flags.contains(OutRecFlags::OUTER))
        {
            OutRecFlags::empty()
        } else {
            OutRecFlags::OUTER
        };
        if self.is_open_edge(e1) {
            flags |= OutRecFlags::OPEN;
        }

        let outrec = self.outrecs.push(OutRec {
            owner,
            pts: None,
            start_edge: None,
            end_edge: None,
            flags,
            polypath: None,
        });

        // orient the ring: which edge carries the start (left) side depends
        // on edge shape when either bound is horizontal
        let outer = flags.contains(OutRecFlags::OUTER);
        let a1 = self.actives[e1];
        let a2 = self.actives[e2];
        let clockwise = if is_horizontal(&a1) {
            if is_horizontal(&a2) {
                outer == (a1.bot.x > a2.bot.x)
            } else {
                outer == (a1.top.x < a1.bot.x)
            }
        } else if is_horizontal(&a2) {
            outer == (a2.top.x > a2.bot.x)
        } else {
            outer == (a1.dx >= a2.dx)
        };
        if clockwise {
            self.set_outrec_sides(outrec, e1, e2);
        } else {
            self.set_outrec_sides(outrec, e2, e1);
        }

        let op = self.outpts.push_ring(pt);
        self.outrecs[outrec].pts = Some(op);
    }

    /// Close (or join) output rings where edges `e1` and `e2` meet at a local
    /// maximum.
    pub(crate) fn add_local_max_poly(
        &mut self,
        e1: ActiveIdx,
        e2: ActiveIdx,
        pt: Point64,
    ) -> ClipResult<()> {
        if self.actives[e2].outrec.is_none() {
            return Err(ClipError::Internal("local maximum closed on a cold edge"));
        }
        self.add_out_pt(e1, pt);
        let (Some(or1), Some(or2)) = (self.actives[e1].outrec, self.actives[e2].outrec) else {
            return Err(ClipError::Internal("local maximum closed on a cold edge"));
        };
        if or1 == or2 {
            self.end_outrec(or1);
        } else if or1.0 < or2.0 {
            // keep the lower index so winding orientation is preserved
            self.join_outrec_paths(e1, e2)?;
        } else {
            self.join_outrec_paths(e2, e1)?;
        }
        Ok(())
    }

    /// Splice `e2`'s ring onto `e1`'s and retire `e2`'s OutRec.
    fn join_outrec_paths(&mut self, e1: ActiveIdx, e2: ActiveIdx) -> ClipResult<()> {
        let (Some(or1), Some(or2)) = (self.actives[e1].outrec, self.actives[e2].outrec) else {
            return Err(ClipError::Internal("joining rings of a cold edge"));
        };
        let (Some(p1_st), Some(p2_st)) = (self.outrecs[or1].pts, self.outrecs[or2].pts) else {
            return Err(ClipError::Internal("joining an empty output ring"));
        };
        let p1_end = self.outpts[p1_st].prev;
        let p2_end = self.outpts[p2_st].prev;

        // only very rarely do the joining ends share the same coordinates
        if self.is_start_side(e1) {
            if self.is_start_side(e2) {
                reverse_out_pt_links(&mut self.outpts, p2_st);
                self.outpts[p2_st].next = p1_st;
                self.outpts[p1_st].prev = p2_st;
                self.outpts[p1_end].next = p2_end;
                self.outpts[p2_end].prev = p1_end;
                self.outrecs[or1].pts = Some(p2_end);
                self.outrecs[or1].start_edge = self.outrecs[or2].end_edge;
            } else {
                self.outpts[p2_end].next = p1_st;
                self.outpts[p1_st].prev = p2_end;
                self.outpts[p2_st].prev = p1_end;
                self.outpts[p1_end].next = p2_st;
                self.outrecs[or1].pts = Some(p2_st);
                self.outrecs[or1].start_edge = self.outrecs[or2].start_edge;
            }
            if let Some(se) = self.outrecs[or1].start_edge {
                self.actives[se].outrec = Some(or1);
            }
        } else {
            if self.is_start_side(e2) {
                self.outpts[p1_end].next = p2_st;
                self.outpts[p2_st].prev = p1_end;
                self.outpts[p1_st].prev = p2_end;
                self.outpts[p2_end].next = p1_st;
                self.outrecs[or1].end_edge = self.outrecs[or2].end_edge;
            } else {
                reverse_out_pt_links(&mut self.outpts, p2_st);
                self.outpts[p1_end].next = p2_end;
                self.outpts[p2_end].prev = p1_end;
                self.outpts[p2_st].next = p1_st;
                self.outpts[p1_st].prev = p2_st;
                self.outrecs[or1].end_edge = self.outrecs[or2].start_edge;
            }
            if let Some(ee) = self.outrecs[or1].end_edge {
                self.actives[ee].outrec = Some(or1);
            }
        }

        if self.outrecs[or1].owner == Some(or2) {
            return Err(ClipError::Internal("ring ownership cycle while joining"));
        }

        // the absorbed ring keeps no vertices
        self.outrecs[or2].start_edge = None;
        self.outrecs[or2].end_edge = None;
        self.outrecs[or2].pts = None;
        self.outrecs[or2].owner = Some(or1);

        // e1 and e2 are maxima and are about to leave the AEL
        self.actives[e1].outrec = None;
        self.actives[e2].outrec = None;
        Ok(())
    }

    /// Release both side edges of a finished ring.
    pub(crate) fn end_outrec(&mut self, outrec: OutRecIdx) {
        if let Some(se) = self.outrecs[outrec].start_edge {
            self.actives[se].outrec = None;
        }
        if let Some(ee) = self.outrecs[outrec].end_edge {
            self.actives[ee].outrec = None;
        }
        self.outrecs[outrec].start_edge = None;
        self.outrecs[outrec].end_edge = None;
    }

    /// Append `pt` to the ring side that edge `e` is bound to.
    pub(crate) fn add_out_pt(&mut self, e: ActiveIdx, pt: Point64) {
        debug_assert!(
            self.actives[e].outrec.is_some(),
            "out point added via a cold edge"
        );
        let Some(or) = self.actives[e].outrec else {
            return;
        };
        let Some(start_op) = self.outrecs[or].pts else {
            return;
        };
        let to_start = self.is_start_side(e);
        let end_op = self.outpts[start_op].prev;
        if to_start {
            if pt == self.outpts[start_op].pt {
                return;
            }
        } else if pt == self.outpts[end_op].pt {
            return;
        }

        let new_op = self.outpts.push(OutPt {
            pt,
            next: start_op,
            prev: end_op,
        });
        self.outpts[end_op].next = new_op;
        self.outpts[start_op].prev = new_op;
        if to_start {
            self.outrecs[or].pts = Some(new_op);
        }
    }

    /// Begin a single-sided ring for a contributing open path edge.
    pub(crate) fn start_open_path(&mut self, e: ActiveIdx, pt: Point64) {
        let outrec = self.outrecs.push(OutRec {
            owner: None,
            pts: None,
            start_edge: None,
            end_edge: None,
            flags: OutRecFlags::OPEN,
            polypath: None,
        });
        self.actives[e].outrec = Some(outrec);
        let op = self.outpts.push_ring(pt);
        self.outrecs[outrec].pts = Some(op);
    }

    pub(crate) fn terminate_hot_open(&mut self, e: ActiveIdx) {
        let Some(or) = self.actives[e].outrec else {
            return;
        };
        if self.outrecs[or].start_edge == Some(e) {
            self.outrecs[or].start_edge = None;
        } else {
            self.outrecs[or].end_edge = None;
        }
        self.actives[e].outrec = None;
    }

    /// Exchange the output rings the two edges are bound to, retargeting each
    /// ring's side references.
    pub(crate) fn swap_outrecs(&mut self, e1: ActiveIdx, e2: ActiveIdx) {
        let or1 = self.actives[e1].outrec;
        let or2 = self.actives[e2].outrec;
        if let (Some(a), Some(b)) = (or1, or2) {
            if a == b {
                let start = self.outrecs[a].start_edge;
                self.outrecs[a].start_edge = self.outrecs[a].end_edge;
                self.outrecs[a].end_edge = start;
                return;
            }
        }
        if let Some(a) = or1 {
            if self.outrecs[a].start_edge == Some(e1) {
                self.outrecs[a].start_edge = Some(e2);
            } else {
                self.outrecs[a].end_edge = Some(e2);
            }
        }
        if let Some(b) = or2 {
            if self.outrecs[b].start_edge == Some(e2) {
                self.outrecs[b].start_edge = Some(e1);
            } else {
                self.outrecs[b].end_edge = Some(e1);
            }
        }
        self.actives[e1].outrec = or2;
        self.actives[e2].outrec = or1;
    }
}
