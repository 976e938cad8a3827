use super::active::{get_intersect_point, top_x, ActiveIdx};
use super::engine::Clipper;
use crate::core::error::{ClipError, ClipResult};
use crate::core::math::Point64;

/// A crossing of two AEL edges discovered inside the current scanbeam.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IntersectNode {
    pub pt: Point64,
    pub edge1: ActiveIdx,
    pub edge2: ActiveIdx,
}

impl Clipper {
    /// Find and apply every AEL crossing strictly inside the scanbeam ending
    /// at `top_y`.
    pub(crate) fn process_intersections(&mut self, top_y: i64) -> ClipResult<()> {
        self.build_intersect_list(top_y);
        if self.intersect_list.is_empty() {
            return Ok(());
        }
        self.fixup_intersection_order()?;
        self.process_intersect_list()
    }

    fn insert_new_intersect_node(&mut self, e1: ActiveIdx, e2: ActiveIdx, top_y: i64) {
        let a1 = self.actives[e1];
        let a2 = self.actives[e2];
        let mut pt = get_intersect_point(&a1, &a2);

        // Rounding can occasionally place the calculated point below or above
        // the scanbeam, so clamp and rederive x from the more vertical edge.
        if pt.y > a1.curr.y {
            // curr.y is still the bottom of the scanbeam
            pt.y = a1.curr.y;
            pt.x = if a1.dx.abs() < a2.dx.abs() {
                top_x(&a1, pt.y)
            } else {
                top_x(&a2, pt.y)
            };
        } else if pt.y < top_y {
            pt.y = top_y;
            pt.x = if a1.top.y == top_y {
                a1.top.x
            } else if a2.top.y == top_y {
                a2.top.x
            } else if a1.dx.abs() < a2.dx.abs() {
                a1.curr.x
            } else {
                a2.curr.x
            };
        }

        self.intersect_list.push(IntersectNode {
            pt,
            edge1: e1,
            edge2: e2,
        });
    }

    /// Merge sort the SEL into its order at the top of the scanbeam,
    /// recording an [IntersectNode] for every pair of edges that swap.
    fn build_intersect_list(&mut self, top_y: i64) {
        let Some(head) = self.ael_first else {
            return;
        };
        if self.actives[head].next_in_ael.is_none() {
            return;
        }

        // copy AEL to SEL while also adjusting curr.x
        self.sel_first = self.ael_first;
        let mut e = self.ael_first;
        while let Some(c) = e {
            let a = &mut self.actives[c];
            a.prev_in_sel = a.prev_in_ael;
            a.next_in_sel = a.next_in_ael;
            let x = top_x(a, top_y);
            a.curr.x = x;
            e = a.next_in_ael;
        }

        // bottom-up merge over successively doubling sorted block widths;
        // merge_jump strides over the sorted sublists
        let mut mul = 1;
        loop {
            let mut first = self.sel_first;
            let mut prev_base: Option<ActiveIdx> = None;

            while let Some(f) = first {
                let second = if mul == 1 {
                    self.actives[f].next_in_sel
                } else {
                    self.actives[f].merge_jump
                };
                let Some(mut s) = second else {
                    break;
                };
                self.actives[f].merge_jump = if mul == 1 {
                    self.actives[s].next_in_sel
                } else {
                    self.actives[s].merge_jump
                };

                let mut base = f;
                let mut fcur = f;
                let mut l_cnt = mul;
                let mut r_cnt = mul;
                while l_cnt > 0 && r_cnt > 0 {
                    if self.actives[s].curr.x < self.actives[fcur].curr.x {
                        // the out-of-place edge crosses every edge left in the
                        // block; record an intersection with each
                        let mut tmp = self.actives[s].prev_in_sel;
                        for _ in 0..l_cnt {
                            let Some(t) = tmp else {
                                break;
                            };
                            self.insert_new_intersect_node(t, s, top_y);
                            tmp = self.actives[t].prev_in_sel;
                        }

                        if fcur == base {
                            if let Some(pb) = prev_base {
                                self.actives[pb].merge_jump = Some(s);
                            }
                            base = s;
                            self.actives[s].merge_jump = self.actives[fcur].merge_jump;
                            if self.actives[fcur].prev_in_sel.is_none() {
                                self.sel_first = Some(s);
                            }
                        }
                        let next = self.actives[s].next_in_sel;
                        self.insert2_before1_in_sel(fcur, s);
                        let Some(n) = next else {
                            break;
                        };
                        s = n;
                        r_cnt -= 1;
                    } else {
                        match self.actives[fcur].next_in_sel {
                            Some(n) => fcur = n,
                            None => break,
                        }
                        l_cnt -= 1;
                    }
                }
                first = self.actives[base].merge_jump;
                prev_base = Some(base);
            }

            if self
                .sel_first
                .and_then(|s| self.actives[s].merge_jump)
                .is_none()
            {
                break;
            }
            mul <<= 1;
        }
    }

    fn edges_adjacent_in_sel(&self, node: &IntersectNode) -> bool {
        self.actives[node.edge1].next_in_sel == Some(node.edge2)
            || self.actives[node.edge1].prev_in_sel == Some(node.edge2)
    }

    /// Re-sort the intersection list bottom-up and re-order it so every node
    /// references edges that are adjacent at the moment it applies.
    fn fixup_intersection_order(&mut self) -> ClipResult<()> {
        let cnt = self.intersect_list.len();
        if cnt < 3 {
            return Ok(());
        }
        self.copy_ael_to_sel();
        self.intersect_list.sort_by(|a, b| b.pt.y.cmp(&a.pt.y));
        for i in 0..cnt {
            if !self.edges_adjacent_in_sel(&self.intersect_list[i]) {
                let mut j = i + 1;
                while j < cnt && !self.edges_adjacent_in_sel(&self.intersect_list[j]) {
                    j += 1;
                }
                if j == cnt {
                    return Err(ClipError::Internal(
                        "intersection list cannot be ordered adjacently",
                    ));
                }
                self.intersect_list.swap(i, j);
            }
            let node = self.intersect_list[i];
            self.swap_positions_in_sel(node.edge1, node.edge2);
        }
        Ok(())
    }

    fn process_intersect_list(&mut self) -> ClipResult<()> {
        let nodes = std::mem::take(&mut self.intersect_list);
        for node in &nodes {
            self.intersect_edges(node.edge1, node.edge2, node.pt)?;
            self.swap_positions_in_ael(node.edge1, node.edge2);
        }
        Ok(())
    }
}
