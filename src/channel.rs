//! Symmetry channels of two- and three-body kets.
//!
//! A channel is the set of kets sharing the conserved quantum numbers.
//! Each channel records the global indices of its kets (`ket_list`, whose
//! positions are the local indices) and the inverse map (`ket_map`).  Two-body
//! maps are dense with `-1` for kets outside the channel; three-body maps are
//! sparse since most of the three-body chart is empty.
use std::ops::Deref;
use fnv::FnvHashMap;
use super::half::Half;
use super::ket::{Ket, Ket3};
use super::mat::Mat;
use super::model_space::ModelSpace;
use super::orbit::Orbit;
use super::parity::Parity;
use super::recoupling::triangle;
use super::utils::cast;

/// Value of `ket_map` for kets outside the channel.
pub const NO_KET: i32 = -1;

/// Rule deciding which two-body kets belong to a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coupling {
    /// Ordinary `|p q; J⟩` coupling.  Identical orbits only appear in even
    /// `J` channels.
    Standard,
    /// Cross-coupled (Pandya-transformed) coupling.  Kets are grouped by
    /// `|Tz|`, any `J` allowed by the triangle rule qualifies, and there is
    /// no Pauli restriction.
    CrossCoupled,
}

impl Coupling {
    pub fn admits(
        self,
        label: TwoBodyLabel,
        ket: &Ket,
        (op, oq): (&Orbit, &Orbit),
        n2max: i32,
    ) -> bool {
        if ket.parity != label.parity || ket.e2 > n2max {
            return false;
        }
        match self {
            Coupling::Standard => ket.tz == label.tz && ket.admits_j(label.j),
            Coupling::CrossCoupled => {
                ket.tz.abs() == label.tz
                    && triangle(Half(op.j2()), Half(oq.j2()),
                                Half::from(label.j))
            }
        }
    }
}

/// Conserved quantum numbers of a two-body channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TwoBodyLabel {
    pub j: i32,
    pub parity: Parity,
    pub tz: i32,
}

/// Number of two-body channels for the given `TwoBodyJmax`.
#[inline]
pub fn num_two_body_channels(jmax: i32) -> usize {
    6 * (jmax as usize + 1)
}

/// Position of the channel, ordered by `Tz`, then parity, then `J`.
pub fn two_body_channel_index(jmax: i32, label: TwoBodyLabel)
                              -> Option<usize>
{
    let TwoBodyLabel { j, parity, tz } = label;
    if j < 0 || j > jmax || tz.abs() > 1 {
        return None;
    }
    let nj = jmax + 1;
    Some(((tz + 1) * 2 * nj + i32::from(parity) * nj + j) as usize)
}

/// Inverse of `two_body_channel_index`.
pub fn two_body_channel_label(jmax: i32, index: usize) -> TwoBodyLabel {
    assert!(index < num_two_body_channels(jmax),
            "two-body channel {} out of range", index);
    let nj = jmax as usize + 1;
    TwoBodyLabel {
        j: (index % nj) as i32,
        parity: Parity::of(index / nj),
        tz: (index / (2 * nj)) as i32 - 1,
    }
}

/// Projector onto the local indices `rows`: one unit row per member.
fn projector(rows: &[usize], num_kets: usize) -> Mat<f64> {
    let mut m = Mat::zeros(rows.len(), num_kets);
    for (r, &i) in rows.iter().enumerate() {
        m[(r, i)] = 1.0;
    }
    m
}

/// Block of two-body kets with common `(J, parity, Tz)`.
#[derive(Clone, Debug)]
pub struct TwoBodyChannel {
    label: TwoBodyLabel,
    coupling: Coupling,
    ket_list: Vec<usize>,
    ket_map: Vec<i32>,
    proj_pp: Mat<f64>,
    proj_hh: Mat<f64>,
    proj_ph_cc: Mat<f64>,
}

impl TwoBodyChannel {
    /// Scan all kets once and collect those admitted by `coupling` with at
    /// most `n2max` quanta.
    pub fn new(
        label: TwoBodyLabel,
        coupling: Coupling,
        kets: &[Ket],
        orbits: &[Orbit],
        n2max: i32,
    ) -> Self {
        let mut ket_list = Vec::new();
        let mut ket_map = vec![NO_KET; kets.len()];
        for (g, ket) in kets.iter().enumerate() {
            let o = (&orbits[ket.p], &orbits[ket.q]);
            if coupling.admits(label, ket, o, n2max) {
                ket_map[g] = cast(ket_list.len());
                ket_list.push(g);
            }
        }

        let occupied = |pred: &dyn Fn(&Orbit, &Orbit) -> bool| -> Vec<usize> {
            ket_list.iter().enumerate().filter(|&(_, &g)| {
                let ket = &kets[g];
                pred(&orbits[ket.p], &orbits[ket.q])
            }).map(|(i, _)| i).collect()
        };
        let n = ket_list.len();
        let proj_pp = projector(
            &occupied(&|a, b| a.is_particle() && b.is_particle()), n);
        let proj_hh = projector(
            &occupied(&|a, b| a.is_hole() && b.is_hole()), n);
        let proj_ph_cc = projector(
            &occupied(&|a, b| a.is_particle() != b.is_particle()), n);

        Self { label, coupling, ket_list, ket_map,
               proj_pp, proj_hh, proj_ph_cc }
    }

    #[inline]
    pub fn label(&self) -> TwoBodyLabel {
        self.label
    }

    #[inline]
    pub fn j(&self) -> i32 {
        self.label.j
    }

    #[inline]
    pub fn parity(&self) -> Parity {
        self.label.parity
    }

    #[inline]
    pub fn tz(&self) -> i32 {
        self.label.tz
    }

    #[inline]
    pub fn coupling(&self) -> Coupling {
        self.coupling
    }

    #[inline]
    pub fn num_kets(&self) -> usize {
        self.ket_list.len()
    }

    /// Global ket indices; the position in this list is the local index.
    #[inline]
    pub fn ket_list(&self) -> &[usize] {
        &self.ket_list
    }

    /// Global → local map with `NO_KET` for non-members.
    #[inline]
    pub fn ket_map(&self) -> &[i32] {
        &self.ket_map
    }

    #[inline]
    pub fn local_index(&self, ket: usize) -> Option<usize> {
        match self.ket_map.get(ket) {
            Some(&i) if i != NO_KET => Some(i as usize),
            _ => None,
        }
    }

    /// Particle-particle projector, `(#pp kets) × num_kets`.
    pub fn proj_pp(&self) -> &Mat<f64> {
        &self.proj_pp
    }

    /// Hole-hole projector, `(#hh kets) × num_kets`.
    pub fn proj_hh(&self) -> &Mat<f64> {
        &self.proj_hh
    }

    /// Particle-hole projector, `(#ph kets) × num_kets`.
    pub fn proj_ph_cc(&self) -> &Mat<f64> {
        &self.proj_ph_cc
    }

    /// Local indices of the members of a sorted list of global kets.
    pub fn select(&self, kets: &[usize]) -> Vec<usize> {
        kets.iter().filter_map(|&g| self.local_index(g)).collect()
    }
}

/// A two-body channel together with the model space it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct TwoBodyChannelView<'a> {
    ms: &'a ModelSpace,
    chan: &'a TwoBodyChannel,
}

impl<'a> Deref for TwoBodyChannelView<'a> {
    type Target = TwoBodyChannel;
    fn deref(&self) -> &Self::Target {
        self.chan
    }
}

impl<'a> TwoBodyChannelView<'a> {
    pub(crate) fn new(ms: &'a ModelSpace, chan: &'a TwoBodyChannel) -> Self {
        Self { ms, chan }
    }

    pub fn model_space(&self) -> &'a ModelSpace {
        self.ms
    }

    pub fn channel(&self) -> &'a TwoBodyChannel {
        self.chan
    }

    /// Ket at local index `i`.
    pub fn ket(&self, i: usize) -> &'a Ket {
        self.ms.ket(self.chan.ket_list[i])
    }

    /// Local index of `|p q⟩` (`p ≤ q`), if it belongs to this channel.
    pub fn local_index_pq(&self, p: usize, q: usize) -> Option<usize> {
        self.chan.local_index(self.ms.ket_index(p, q))
    }

    pub fn ket_index_pp(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_pp())
    }

    pub fn ket_index_ph(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_ph())
    }

    pub fn ket_index_hh(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_hh())
    }

    pub fn ket_index_vv(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_vv())
    }

    pub fn ket_index_holeq_holeq(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_holeq_holeq())
    }

    pub fn ket_index_particleq_particleq(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_particleq_particleq())
    }

    pub fn ket_index_particleq_holeq(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_particleq_holeq())
    }

    pub fn ket_index_v_holeq(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_v_holeq())
    }

    pub fn ket_index_v_particleq(&self) -> Vec<usize> {
        self.chan.select(self.ms.ket_index_v_particleq())
    }
}

/// Conserved quantum numbers of a three-body channel.  `j2` and `tz2` are
/// stored doubled since both are half-odd.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreeBodyLabel {
    /// Coupling of the first two particles.
    pub jpq: i32,
    pub j2: i32,
    pub parity: Parity,
    pub tz2: i32,
}

impl ThreeBodyLabel {
    pub fn admits(
        &self,
        ket: &Ket3,
        (op, oq, or): (&Orbit, &Orbit, &Orbit),
        n3max: i32,
    ) -> bool {
        ket.parity == self.parity
            && ket.tz2 == self.tz2
            && ket.e3 <= n3max
            && (ket.p != ket.q || self.jpq % 2 == 0)
            && triangle(Half(op.j2()), Half(oq.j2()), Half::from(self.jpq))
            && triangle(Half::from(self.jpq), Half(or.j2()), Half(self.j2))
    }
}

/// Dense numbering of three-body channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreeBodyChart {
    /// Largest `Jpq`.
    pub jpq_max: i32,
    /// Largest `2J`.
    pub j2_max: i32,
}

impl ThreeBodyChart {
    fn num_jpq(&self) -> usize {
        self.jpq_max as usize + 1
    }

    fn num_j(&self) -> usize {
        (self.j2_max as usize + 1) / 2
    }

    pub fn len(&self) -> usize {
        // 2 parities × 4 values of 2Tz
        8 * self.num_j() * self.num_jpq()
    }

    pub fn index(&self, label: ThreeBodyLabel) -> Option<usize> {
        let ThreeBodyLabel { jpq, j2, parity, tz2 } = label;
        if jpq < 0 || jpq > self.jpq_max
            || j2 < 1 || j2 > self.j2_max || j2 % 2 == 0
            || tz2.abs() > 3 || tz2 % 2 == 0
        {
            return None;
        }
        let it = ((tz2 + 3) / 2) as usize;
        let ij = ((j2 - 1) / 2) as usize;
        let ip = usize::from(parity);
        Some(((it * 2 + ip) * self.num_j() + ij) * self.num_jpq()
             + jpq as usize)
    }

    pub fn label(&self, index: usize) -> ThreeBodyLabel {
        assert!(index < self.len(), "three-body channel {} out of range",
                index);
        let jpq = (index % self.num_jpq()) as i32;
        let rest = index / self.num_jpq();
        let j2 = 2 * (rest % self.num_j()) as i32 + 1;
        let rest = rest / self.num_j();
        ThreeBodyLabel {
            jpq,
            j2,
            parity: Parity::of(rest % 2),
            tz2: 2 * (rest / 2) as i32 - 3,
        }
    }
}

/// Block of three-body kets with common `(Jpq, J, parity, Tz)`.
#[derive(Clone, Debug)]
pub struct ThreeBodyChannel {
    label: ThreeBodyLabel,
    ket_list: Vec<usize>,
    ket_map: FnvHashMap<usize, usize>,
}

impl ThreeBodyChannel {
    /// Collect the admitted kets among `candidates` (ascending global
    /// indices into `kets`).
    pub fn new(
        label: ThreeBodyLabel,
        kets: &[Ket3],
        candidates: &[usize],
        orbits: &[Orbit],
        n3max: i32,
    ) -> Self {
        let mut ket_list = Vec::new();
        let mut ket_map = FnvHashMap::default();
        for &g in candidates {
            let ket = &kets[g];
            let o = (&orbits[ket.p], &orbits[ket.q], &orbits[ket.r]);
            if label.admits(ket, o, n3max) {
                ket_map.insert(g, ket_list.len());
                ket_list.push(g);
            }
        }
        Self { label, ket_list, ket_map }
    }

    #[inline]
    pub fn label(&self) -> ThreeBodyLabel {
        self.label
    }

    #[inline]
    pub fn num_kets(&self) -> usize {
        self.ket_list.len()
    }

    #[inline]
    pub fn ket_list(&self) -> &[usize] {
        &self.ket_list
    }

    /// Global → local map holding the members only.
    #[inline]
    pub fn ket_map(&self) -> &FnvHashMap<usize, usize> {
        &self.ket_map
    }

    #[inline]
    pub fn local_index(&self, ket: usize) -> Option<usize> {
        self.ket_map.get(&ket).cloned()
    }
}

/// A three-body channel together with the model space it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct ThreeBodyChannelView<'a> {
    ms: &'a ModelSpace,
    chan: &'a ThreeBodyChannel,
}

impl<'a> Deref for ThreeBodyChannelView<'a> {
    type Target = ThreeBodyChannel;
    fn deref(&self) -> &Self::Target {
        self.chan
    }
}

impl<'a> ThreeBodyChannelView<'a> {
    pub(crate) fn new(ms: &'a ModelSpace, chan: &'a ThreeBodyChannel)
                      -> Self
    {
        Self { ms, chan }
    }

    pub fn ket(&self, i: usize) -> &'a Ket3 {
        self.ms.ket3(self.chan.ket_list[i])
    }

    /// Local index of `|p q r⟩` (`p ≤ q ≤ r`), if it belongs here.
    pub fn local_index_pqr(&self, p: usize, q: usize, r: usize)
                           -> Option<usize>
    {
        self.chan.local_index(self.ms.ket3_index(p, q, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_body_channel_index() {
        let jmax = 5;
        assert_eq!(num_two_body_channels(jmax), 36);
        for i in 0 .. num_two_body_channels(jmax) {
            let label = two_body_channel_label(jmax, i);
            assert_eq!(two_body_channel_index(jmax, label), Some(i));
        }
        assert_eq!(two_body_channel_index(jmax, TwoBodyLabel {
            j: 6, parity: Parity::Even, tz: 0 }), None);
        assert_eq!(two_body_channel_index(jmax, TwoBodyLabel {
            j: 0, parity: Parity::Even, tz: 2 }), None);
        assert_eq!(two_body_channel_label(jmax, 0), TwoBodyLabel {
            j: 0, parity: Parity::Even, tz: -1 });
        assert_eq!(two_body_channel_label(jmax, 6), TwoBodyLabel {
            j: 0, parity: Parity::Odd, tz: -1 });
    }

    #[test]
    fn test_three_body_chart() {
        let chart = ThreeBodyChart { jpq_max: 3, j2_max: 9 };
        assert_eq!(chart.len(), 8 * 5 * 4);
        for i in 0 .. chart.len() {
            assert_eq!(chart.index(chart.label(i)), Some(i));
        }
        let bad = ThreeBodyLabel { jpq: 0, j2: 2, parity: Parity::Even,
                                   tz2: 1 };
        assert_eq!(chart.index(bad), None);
        let bad = ThreeBodyLabel { jpq: 0, j2: 1, parity: Parity::Even,
                                   tz2: 5 };
        assert_eq!(chart.index(bad), None);
    }

    #[test]
    fn test_projector() {
        let p = projector(&[0, 2], 3);
        assert_eq!(p.dims(), (2, 3));
        assert_eq!(p.as_slice(), &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
