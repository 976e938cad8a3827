use super::active::ActiveIdx;
use super::engine::Clipper;
use super::{ClipType, FillRule, PathType};
use crate::core::error::ClipResult;
use crate::core::math::Point64;

impl Clipper {
    /// Set the winding counts of a freshly inserted closed left bound.
    ///
    /// Wind counts refer to the polygon regions touching an edge rather than
    /// the edge itself, so an edge's count is the higher of the two region
    /// counts beside it; adjacent region counts only ever differ by one.
    pub(crate) fn set_winding_left_edge_closed(&mut self, e: ActiveIdx) {
        let pt = self.polytype(e);
        let wind_dx = self.actives[e].wind_dx;

        // nearest closed edge of the same polytype, heading left
        let mut e2 = self.actives[e].prev_in_ael;
        while let Some(c) = e2 {
            if self.polytype(c) == pt && !self.is_open_edge(c) {
                break;
            }
            e2 = self.actives[c].prev_in_ael;
        }

        let start = match e2 {
            None => {
                self.actives[e].wind_cnt = wind_dx;
                self.ael_first
            }
            Some(p) if self.fill_rule == FillRule::EvenOdd => {
                self.actives[e].wind_cnt = wind_dx;
                self.actives[e].wind_cnt2 = self.actives[p].wind_cnt2;
                self.actives[p].next_in_ael
            }
            Some(p) => {
                let p_cnt = self.actives[p].wind_cnt;
                let p_dx = self.actives[p].wind_dx;
                self.actives[e].wind_cnt = if p_cnt * p_dx < 0 {
                    // opposite directions, so e starts outside p's region
                    if p_cnt.abs() > 1 {
                        if p_dx * wind_dx < 0 {
                            p_cnt
                        } else {
                            p_cnt + wind_dx
                        }
                    } else if self.is_open_edge(e) {
                        1
                    } else {
                        wind_dx
                    }
                } else {
                    // e is inside p's region
                    if p_dx * wind_dx < 0 {
                        p_cnt
                    } else {
                        p_cnt + wind_dx
                    }
                };
                self.actives[e].wind_cnt2 = self.actives[p].wind_cnt2;
                self.actives[p].next_in_ael
            }
        };

        // accumulate the opposite polytype's count across the skipped edges
        let mut cur = start;
        if self.fill_rule == FillRule::EvenOdd {
            while let Some(c) = cur {
                if c == e {
                    break;
                }
                if self.polytype(c) != pt && !self.is_open_edge(c) {
                    self.actives[e].wind_cnt2 = if self.actives[e].wind_cnt2 == 0 { 1 } else { 0 };
                }
                cur = self.actives[c].next_in_ael;
            }
        } else {
            while let Some(c) = cur {
                if c == e {
                    break;
                }
                if self.polytype(c) != pt && !self.is_open_edge(c) {
                    self.actives[e].wind_cnt2 += self.actives[c].wind_dx;
                }
                cur = self.actives[c].next_in_ael;
            }
        }
    }

    /// Set the winding counts of a freshly inserted open left bound by
    /// scanning the whole AEL up to it.
    pub(crate) fn set_winding_left_edge_open(&mut self, e: ActiveIdx) {
        let mut cur = self.ael_first;
        if self.fill_rule == FillRule::EvenOdd {
            let mut cnt1 = 0;
            let mut cnt2 = 0;
            while let Some(c) = cur {
                if c == e {
                    break;
                }
                if self.polytype(c) == PathType::Clip {
                    cnt2 += 1;
                } else if !self.is_open_edge(c) {
                    cnt1 += 1;
                }
                cur = self.actives[c].next_in_ael;
            }
            self.actives[e].wind_cnt = if cnt1 & 1 == 1 { 1 } else { 0 };
            self.actives[e].wind_cnt2 = if cnt2 & 1 == 1 { 1 } else { 0 };
        } else {
            let mut cnt = 0;
            let mut cnt2 = 0;
            while let Some(c) = cur {
                if c == e {
                    break;
                }
                if self.polytype(c) == PathType::Clip {
                    cnt2 += self.actives[c].wind_dx;
                } else if !self.is_open_edge(c) {
                    cnt += self.actives[c].wind_dx;
                }
                cur = self.actives[c].next_in_ael;
            }
            self.actives[e].wind_cnt = cnt;
            self.actives[e].wind_cnt2 = cnt2;
        }
    }

    pub(crate) fn is_contributing_closed(&self, e: ActiveIdx) -> bool {
        let a = &self.actives[e];
        match self.fill_rule {
            FillRule::EvenOdd => {}
            FillRule::NonZero => {
                if a.wind_cnt.abs() != 1 {
                    return false;
                }
            }
            FillRule::Positive => {
                if a.wind_cnt != 1 {
                    return false;
                }
            }
            FillRule::Negative => {
                if a.wind_cnt != -1 {
                    return false;
                }
            }
        }

        match self.clip_type {
            ClipType::Intersection => match self.fill_rule {
                FillRule::EvenOdd | FillRule::NonZero => a.wind_cnt2 != 0,
                FillRule::Positive => a.wind_cnt2 > 0,
                FillRule::Negative => a.wind_cnt2 < 0,
            },
            ClipType::Union => match self.fill_rule {
                FillRule::EvenOdd | FillRule::NonZero => a.wind_cnt2 == 0,
                FillRule::Positive => a.wind_cnt2 <= 0,
                FillRule::Negative => a.wind_cnt2 >= 0,
            },
            ClipType::Difference => {
                if self.polytype(e) == PathType::Subject {
                    match self.fill_rule {
                        FillRule::EvenOdd | FillRule::NonZero => a.wind_cnt2 == 0,
                        FillRule::Positive => a.wind_cnt2 <= 0,
                        FillRule::Negative => a.wind_cnt2 >= 0,
                    }
                } else {
                    match self.fill_rule {
                        FillRule::EvenOdd | FillRule::NonZero => a.wind_cnt2 != 0,
                        FillRule::Positive => a.wind_cnt2 > 0,
                        FillRule::Negative => a.wind_cnt2 < 0,
                    }
                }
            }
            // xor is always contributing unless open
            ClipType::Xor => true,
        }
    }

    pub(crate) fn is_contributing_open(&self, e: ActiveIdx) -> bool {
        let a = &self.actives[e];
        match self.clip_type {
            ClipType::Intersection => a.wind_cnt2 != 0,
            ClipType::Union => a.wind_cnt == 0 && a.wind_cnt2 == 0,
            ClipType::Difference => a.wind_cnt2 == 0,
            ClipType::Xor => (a.wind_cnt != 0) != (a.wind_cnt2 != 0),
        }
    }

    /// Handle the crossing of `e1` and `e2` at `pt`, updating winding counts
    /// and hot-edge/output-ring state. Assumes `e1` is to the right of `e2`
    /// immediately above the intersection.
    pub(crate) fn intersect_edges(
        &mut self,
        e1: ActiveIdx,
        e2: ActiveIdx,
        pt: Point64,
    ) -> ClipResult<()> {
        self.actives[e1].curr = pt;
        self.actives[e2].curr = pt;

        if self.has_open_paths && (self.is_open_edge(e1) || self.is_open_edge(e2)) {
            if self.is_open_edge(e1) && self.is_open_edge(e2) {
                return Ok(()); // ignore open-open crossings
            }
            let (e1, e2) = if self.is_open_edge(e2) {
                (e2, e1)
            } else {
                (e1, e2)
            };
            match self.clip_type {
                ClipType::Intersection | ClipType::Difference => {
                    if self.is_same_polytype(e1, e2) || self.actives[e2].wind_cnt.abs() != 1 {
                        return Ok(());
                    }
                }
                ClipType::Union => {
                    if self.is_hot(e1)
                        != ((self.actives[e2].wind_cnt.abs() != 1)
                            || (self.is_hot(e1) != (self.actives[e2].wind_cnt != 0)))
                    {
                        return Ok(());
                    }
                }
                ClipType::Xor => {
                    if self.actives[e2].wind_cnt.abs() != 1 {
                        return Ok(());
                    }
                }
            }
            // toggle the open path's contribution
            if self.is_hot(e1) {
                self.add_out_pt(e1, pt);
                self.terminate_hot_open(e1);
            } else {
                self.start_open_path(e1, pt);
            }
            return Ok(());
        }

        // update winding counts; both edges are closed here
        if self.is_same_polytype(e1, e2) {
            if self.fill_rule == FillRule::EvenOdd {
                let old = self.actives[e1].wind_cnt;
                self.actives[e1].wind_cnt = self.actives[e2].wind_cnt;
                self.actives[e2].wind_cnt = old;
            } else {
                let e2_dx = self.actives[e2].wind_dx;
                let e1_dx = self.actives[e1].wind_dx;
                if self.actives[e1].wind_cnt + e2_dx == 0 {
                    self.actives[e1].wind_cnt = -self.actives[e1].wind_cnt;
                } else {
                    self.actives[e1].wind_cnt += e2_dx;
                }
                if self.actives[e2].wind_cnt - e1_dx == 0 {
                    self.actives[e2].wind_cnt = -self.actives[e2].wind_cnt;
                } else {
                    self.actives[e2].wind_cnt -= e1_dx;
                }
            }
        } else if self.fill_rule != FillRule::EvenOdd {
            self.actives[e1].wind_cnt2 += self.actives[e2].wind_dx;
            self.actives[e2].wind_cnt2 -= self.actives[e1].wind_dx;
        } else {
            self.actives[e1].wind_cnt2 = if self.actives[e1].wind_cnt2 == 0 { 1 } else { 0 };
            self.actives[e2].wind_cnt2 = if self.actives[e2].wind_cnt2 == 0 { 1 } else { 0 };
        }

        let (old_e1_windcnt, old_e2_windcnt) = match self.fill_rule {
            FillRule::Positive => (self.actives[e1].wind_cnt, self.actives[e2].wind_cnt),
            FillRule::Negative => (-self.actives[e1].wind_cnt, -self.actives[e2].wind_cnt),
            _ => (
                self.actives[e1].wind_cnt.abs(),
                self.actives[e2].wind_cnt.abs(),
            ),
        };

        if self.is_hot(e1) && self.is_hot(e2) {
            if (old_e1_windcnt != 0 && old_e1_windcnt != 1)
                || (old_e2_windcnt != 0 && old_e2_windcnt != 1)
                || (!self.is_same_polytype(e1, e2) && self.clip_type != ClipType::Xor)
            {
                self.add_local_max_poly(e1, e2, pt)?;
            } else if self.actives[e1].outrec == self.actives[e2].outrec {
                // the rings touch: split and immediately reopen
                self.add_local_max_poly(e1, e2, pt)?;
                self.add_local_min_poly(e1, e2, pt);
            } else {
                self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_outrecs(e1, e2);
            }
        } else if self.is_hot(e1) {
            if old_e2_windcnt == 0 || old_e2_windcnt == 1 {
                self.add_out_pt(e1, pt);
                self.swap_outrecs(e1, e2);
            }
        } else if self.is_hot(e2) {
            if old_e1_windcnt == 0 || old_e1_windcnt == 1 {
                self.add_out_pt(e2, pt);
                self.swap_outrecs(e1, e2);
            }
        } else if (old_e1_windcnt == 0 || old_e1_windcnt == 1)
            && (old_e2_windcnt == 0 || old_e2_windcnt == 1)
        {
            // neither edge is currently contributing
            let (e1_wc2, e2_wc2) = match self.fill_rule {
                FillRule::Positive => (self.actives[e1].wind_cnt2, self.actives[e2].wind_cnt2),
                FillRule::Negative => (-self.actives[e1].wind_cnt2, -self.actives[e2].wind_cnt2),
                _ => (
                    self.actives[e1].wind_cnt2.abs(),
                    self.actives[e2].wind_cnt2.abs(),
                ),
            };

            if !self.is_same_polytype(e1, e2) {
                self.add_local_min_poly(e1, e2, pt);
            } else if old_e1_windcnt == 1 && old_e2_windcnt == 1 {
                match self.clip_type {
                    ClipType::Intersection => {
                        if e1_wc2 > 0 && e2_wc2 > 0 {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Union => {
                        if e1_wc2 <= 0 && e2_wc2 <= 0 {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Difference => {
                        if (self.polytype(e1) == PathType::Clip && e1_wc2 > 0 && e2_wc2 > 0)
                            || (self.polytype(e1) == PathType::Subject
                                && e1_wc2 <= 0
                                && e2_wc2 <= 0)
                        {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Xor => self.add_local_min_poly(e1, e2, pt),
                }
            }
        }
        Ok(())
    }
}
