use super::active::{is_horizontal, set_dx, top_x, ActiveIdx};
use super::engine::Clipper;
use super::vertex::VertexFlags;
use crate::core::error::{ClipError, ClipResult};
use crate::core::math::Point64;

impl Clipper {
    /// Locate the edge terminating at the same top vertex as `e`, if it is
    /// currently in the AEL.
    pub(crate) fn get_maxima_pair(&self, e: ActiveIdx) -> Option<ActiveIdx> {
        let vt = self.actives[e].vertex_top;
        if is_horizontal(&self.actives[e]) {
            // the pair of a horizontal may lie on either side
            let top = self.actives[e].top;
            let mut e2 = self.actives[e].prev_in_ael;
            while let Some(c) = e2 {
                if self.actives[c].curr.x < top.x {
                    break;
                }
                if self.actives[c].vertex_top == vt {
                    return Some(c);
                }
                e2 = self.actives[c].prev_in_ael;
            }
            let mut e2 = self.actives[e].next_in_ael;
            while let Some(c) = e2 {
                if top_x(&self.actives[c], top.y) > top.x {
                    break;
                }
                if self.actives[c].vertex_top == vt {
                    return Some(c);
                }
                e2 = self.actives[c].next_in_ael;
            }
            None
        } else {
            let mut e2 = self.actives[e].next_in_ael;
            while let Some(c) = e2 {
                if self.actives[c].vertex_top == vt {
                    return Some(c);
                }
                e2 = self.actives[c].next_in_ael;
            }
            None
        }
    }

    /// Advance an edge to the next segment of its bound.
    pub(crate) fn update_edge_into_ael(&mut self, e: ActiveIdx) {
        let old_top = self.actives[e].top;
        self.actives[e].bot = old_top;
        self.actives[e].curr = old_top;
        let vt = self.next_vertex(e);
        self.actives[e].vertex_top = vt;
        self.actives[e].top = self.vertices[vt].pt;
        set_dx(&mut self.actives[e]);
        if !is_horizontal(&self.actives[e]) {
            let y = self.actives[e].top.y;
            self.insert_scanline(y);
        }
    }

    /// Compute the swept x range of a horizontal and whether the walk over
    /// the AEL proceeds left to right.
    fn reset_horz_direction(
        &self,
        horz: ActiveIdx,
        max_pair: Option<ActiveIdx>,
    ) -> (bool, i64, i64) {
        let a = &self.actives[horz];
        if a.bot.x == a.top.x {
            // the horizontal edge is going nowhere; direction only matters for
            // reaching a maxima pair to the right
            let left = a.curr.x;
            let mut e = a.next_in_ael;
            while let Some(c) = e {
                if Some(c) == max_pair {
                    break;
                }
                e = self.actives[c].next_in_ael;
            }
            (e.is_some(), left, left)
        } else if a.curr.x < a.top.x {
            (true, a.curr.x, a.top.x)
        } else {
            (false, a.top.x, a.curr.x)
        }
    }

    /// Sweep a deferred horizontal edge through the AEL.
    ///
    /// Horizontals at a scanline are processed as if layered: each one
    /// intersects the bottom vertices of other horizontals and any
    /// non-horizontal edges inside its x range, after which intermediate
    /// horizontals are promoted to the next edge in their bounds.
    pub(crate) fn process_horizontal(&mut self, horz: ActiveIdx) -> ClipResult<()> {
        // with closed paths, coalesce consecutive horizontals into one edge
        if !self.is_open_edge(horz) {
            let pt = self.actives[horz].bot;
            while !self.is_maxima(horz) && self.vertices[self.next_vertex(horz)].pt.y == pt.y {
                self.update_edge_into_ael(horz);
            }
            self.actives[horz].bot = pt;
            self.actives[horz].curr = pt;
        }

        let mut max_pair = None;
        if self.is_maxima(horz)
            && (!self.is_open_edge(horz)
                || !self.vertices[self.actives[horz].vertex_top]
                    .flags
                    .intersects(VertexFlags::OPEN_START | VertexFlags::OPEN_END))
        {
            max_pair = self.get_maxima_pair(horz);
        }

        let (mut is_left_to_right, mut horz_left, mut horz_right) =
            self.reset_horz_direction(horz, max_pair);
        if self.is_hot(horz) {
            let pt = self.actives[horz].curr;
            self.add_out_pt(horz, pt);
        }

        loop {
            // loops through consecutive horizontal edges (if open)
            let is_max = self.is_maxima(horz);
            let mut e = if is_left_to_right {
                self.actives[horz].next_in_ael
            } else {
                self.actives[horz].prev_in_ael
            };

            while let Some(ec) = e {
                // break if we've gone past the end of the horizontal
                if is_left_to_right && self.actives[ec].curr.x > horz_right {
                    break;
                }
                if !is_left_to_right && self.actives[ec].curr.x < horz_left {
                    break;
                }
                // or at the end of an intermediate horizontal, when the next
                // segment of the bound blocks further progress
                if self.actives[ec].curr.x == self.actives[horz].top.x
                    && !is_max
                    && !is_horizontal(&self.actives[ec])
                {
                    let pt = self.vertices[self.next_vertex(horz)].pt;
                    if (is_left_to_right && top_x(&self.actives[ec], pt.y) >= pt.x)
                        || (!is_left_to_right && top_x(&self.actives[ec], pt.y) <= pt.x)
                    {
                        break;
                    }
                }

                if Some(ec) == max_pair {
                    if self.is_hot(horz) {
                        let top = self.actives[horz].top;
                        self.add_local_max_poly(horz, ec, top)?;
                    }
                    self.delete_from_ael(ec);
                    self.delete_from_ael(horz);
                    return Ok(());
                }

                let pt = Point64::new(self.actives[ec].curr.x, self.actives[horz].curr.y);
                if is_left_to_right {
                    self.intersect_edges(horz, ec, pt)?;
                } else {
                    self.intersect_edges(ec, horz, pt)?;
                }

                let next_e = if is_left_to_right {
                    self.actives[ec].next_in_ael
                } else {
                    self.actives[ec].prev_in_ael
                };
                self.swap_positions_in_ael(horz, ec);
                e = next_e;
            }

            // finished unless there are more consecutive horizontals in the bound
            if is_max || self.vertices[self.next_vertex(horz)].pt.y != self.actives[horz].top.y {
                break;
            }

            self.update_edge_into_ael(horz);
            let dir = self.reset_horz_direction(horz, max_pair);
            is_left_to_right = dir.0;
            horz_left = dir.1;
            horz_right = dir.2;

            if self.is_open_edge(horz) {
                if self.is_maxima(horz) {
                    max_pair = self.get_maxima_pair(horz);
                }
                if self.is_hot(horz) {
                    let bot = self.actives[horz].bot;
                    self.add_out_pt(horz, bot);
                }
            }
        }

        if self.is_hot(horz) {
            let top = self.actives[horz].top;
            self.add_out_pt(horz, top);
        }

        if !self.is_open_edge(horz) {
            // the end of an intermediate horizontal
            self.update_edge_into_ael(horz);
        } else if !self.is_maxima(horz) {
            self.update_edge_into_ael(horz);
        } else {
            match max_pair {
                None => self.delete_from_ael(horz), // open at top
                Some(mp) if self.is_hot(horz) => {
                    let top = self.actives[horz].top;
                    self.add_local_max_poly(horz, mp, top)?;
                }
                Some(mp) => {
                    self.delete_from_ael(mp);
                    self.delete_from_ael(horz);
                }
            }
        }
        Ok(())
    }

    /// Advance every edge that reaches the scanline `y`: maxima close (or
    /// join) their rings, intermediate vertices promote to the next segment,
    /// and everything else just refreshes `curr`.
    pub(crate) fn do_top_of_scanbeam(&mut self, y: i64) -> ClipResult<()> {
        let mut e = self.ael_first;
        while let Some(c) = e {
            // an edge is never horizontal at this point
            if self.actives[c].top.y == y {
                let top = self.actives[c].top;
                self.actives[c].curr = top; // needed for horizontal processing
                if self.is_maxima(c) {
                    e = self.do_maxima(c)?;
                    continue;
                }
                // intermediate vertex
                self.update_edge_into_ael(c);
                if self.is_hot(c) {
                    let bot = self.actives[c].bot;
                    self.add_out_pt(c, bot);
                }
                if is_horizontal(&self.actives[c]) {
                    self.push_horz(c); // horizontals are processed later
                }
            } else {
                self.actives[c].curr.y = y;
                let x = top_x(&self.actives[c], y);
                self.actives[c].curr.x = x;
            }
            e = self.actives[c].next_in_ael;
        }
        Ok(())
    }

    /// Close out an edge terminating at a local maximum; returns the edge to
    /// resume the AEL walk from (stable under the deletions performed).
    fn do_maxima(&mut self, e: ActiveIdx) -> ClipResult<Option<ActiveIdx>> {
        let prev_e = self.actives[e].prev_in_ael;
        let next_e = self.actives[e].next_in_ael;
        let top = self.actives[e].top;

        if self.is_open_edge(e)
            && self.vertices[self.actives[e].vertex_top]
                .flags
                .intersects(VertexFlags::OPEN_START | VertexFlags::OPEN_END)
        {
            if self.is_hot(e) {
                self.add_out_pt(e, top);
            }
            if !is_horizontal(&self.actives[e]) {
                if self.is_hot(e) {
                    self.terminate_hot_open(e);
                }
                self.delete_from_ael(e);
            }
            return Ok(next_e);
        }

        let Some(max_pair) = self.get_maxima_pair(e) else {
            return Ok(next_e); // the pair is horizontal and still deferred
        };

        // process any edges caught between the maxima pair
        let mut next = next_e;
        while next != Some(max_pair) {
            let Some(n) = next else {
                return Err(ClipError::Internal("maxima pair unreachable in the list"));
            };
            self.intersect_edges(e, n, top)?;
            self.swap_positions_in_ael(e, n);
            next = self.actives[e].next_in_ael;
        }

        if self.is_open_edge(e) {
            if self.is_hot(e) {
                self.add_local_max_poly(e, max_pair, top)?;
            }
            self.delete_from_ael(max_pair);
            self.delete_from_ael(e);
        } else {
            if self.is_hot(e) {
                self.add_local_max_poly(e, max_pair, top)?;
            }
            self.delete_from_ael(e);
            self.delete_from_ael(max_pair);
        }
        Ok(match prev_e {
            Some(p) => self.actives[p].next_in_ael,
            None => self.ael_first,
        })
    }
}
