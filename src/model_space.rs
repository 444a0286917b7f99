//! The model space: orbits, kets, channels, and recoupling caches.
//!
//! A model space is assembled with a `ModelSpaceBuilder`, which collects
//! orbits and then derives the kets and the two-body channels in sequential
//! passes.  The finished `ModelSpace` is read-only apart from its truncation
//! parameters and the coefficient caches, which grow on demand and may be
//! shared between threads.
use std::sync::Arc;
use fnv::FnvHashMap;
use super::channel::{self, Coupling, ThreeBodyChannel, ThreeBodyChannelView,
                     ThreeBodyChart, ThreeBodyLabel, TwoBodyChannel,
                     TwoBodyChannelView, TwoBodyLabel};
use super::ket::{self, Ket, Ket3};
use super::orbit::{self, Ho3dIter, Occ, Orbit, OrbitLabel, Space};
use super::parity::Parity;
use super::recoupling::{Moshinsky, NineJ, RawCoefficients, Recoupling, SixJ};

quick_error! {
    /// Error type for model space construction.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Error {
        Orbit(err: orbit::Error) {
            from()
            display("{}", err)
            source(err)
        }
        DuplicateOrbit(label: OrbitLabel) {
            display("orbit {} was added more than once", label)
        }
        OutsideTruncation(label: OrbitLabel, nmax: i32) {
            display("orbit {} lies above Nmax = {}", label, nmax)
        }
        MissingOrbit(index: usize) {
            display("orbit {} is missing; orbits must be contiguous", index)
        }
        UnknownOrbit(label: String) {
            display("{:?} does not name an orbit of the model space", label)
        }
    }
}

/// Configuration of a model space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// Maximum oscillator quanta of a single orbit.
    pub nmax: i32,
    /// Maximum oscillator quanta of a two-body state.
    pub n2max: i32,
    /// Maximum oscillator quanta of a three-body state.
    pub n3max: i32,
    /// Oscillator frequency in MeV.
    pub hbar_omega: f64,
    pub target_mass: i32,
    /// Number of lock shards per coefficient cache.
    pub cache_shards: usize,
}

/// `{ nmax: 0, n2max: 0, n3max: 0, hbar_omega: 20.0, target_mass: 16, .. }`
impl Default for Conf {
    fn default() -> Self {
        Self {
            nmax: 0,
            n2max: 0,
            n3max: 0,
            hbar_omega: 20.0,
            target_mass: 16,
            cache_shards: 16,
        }
    }
}

impl Conf {
    /// Truncate at `nmax` with `n2max = 2 nmax` and `n3max = 3 nmax`.
    pub fn with_nmax(nmax: i32) -> Self {
        Self {
            nmax,
            n2max: 2 * nmax,
            n3max: 3 * nmax,
            .. Default::default()
        }
    }
}

/// Construction phase of a `ModelSpace`.
#[derive(Clone, Debug)]
pub struct ModelSpaceBuilder {
    conf: Conf,
    slots: Vec<Option<Orbit>>,
}

impl ModelSpaceBuilder {
    pub fn new(conf: Conf) -> Self {
        Self { conf, slots: Vec::new() }
    }

    /// Every oscillator orbit up to `Nmax` for both protons and neutrons,
    /// with the named orbits (e.g. `"p0s1"`) marked as holes or as valence.
    /// Single-particle energies are the oscillator energies.
    pub fn oscillator(conf: Conf, holes: &[&str], valence: &[&str])
                      -> Result<Self, Error>
    {
        let parse = |names: &[&str]| -> Result<Vec<OrbitLabel>, Error> {
            names.iter().map(|name| -> Result<OrbitLabel, Error> {
                let label: OrbitLabel = name.parse()?;
                if 2 * label.n + label.l > conf.nmax {
                    return Err(Error::UnknownOrbit(name.to_string()));
                }
                Ok(label)
            }).collect()
        };
        let holes = parse(holes)?;
        let valence = parse(valence)?;
        let mut builder = Self::new(conf);
        for nlj in Ho3dIter::default().take_while(|s| s.shell() <= conf.nmax) {
            for &tz2 in &[-1, 1] {
                let label = OrbitLabel { n: nlj.n, l: nlj.l, j2: nlj.j2, tz2 };
                let occ = if holes.contains(&label) { Occ::I } else { Occ::A };
                let space = if valence.contains(&label) {
                    Space::Inside
                } else {
                    Space::Outside
                };
                let spe = conf.hbar_omega * (nlj.shell() as f64 + 1.5);
                builder.add_orbit(Orbit::from_label(label, occ, space, spe)?)?;
            }
        }
        Ok(builder)
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    pub fn set_nmax(&mut self, nmax: i32) -> &mut Self {
        self.conf.nmax = nmax;
        self
    }

    pub fn set_n2max(&mut self, n2max: i32) -> &mut Self {
        self.conf.n2max = n2max;
        self
    }

    pub fn set_n3max(&mut self, n3max: i32) -> &mut Self {
        self.conf.n3max = n3max;
        self
    }

    pub fn set_hbar_omega(&mut self, hbar_omega: f64) -> &mut Self {
        self.conf.hbar_omega = hbar_omega;
        self
    }

    pub fn set_target_mass(&mut self, target_mass: i32) -> &mut Self {
        self.conf.target_mass = target_mass;
        self
    }

    /// Number of orbits added so far.
    pub fn num_orbits(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Place the orbit at its canonical position.  Returns the position.
    pub fn add_orbit(&mut self, orbit: Orbit) -> Result<usize, Error> {
        if orbit.e() > self.conf.nmax {
            return Err(Error::OutsideTruncation(orbit.label(),
                                                self.conf.nmax));
        }
        let i = orbit.index();
        if self.slots.len() <= i {
            self.slots.resize(i + 1, None);
        }
        if self.slots[i].is_some() {
            return Err(Error::DuplicateOrbit(orbit.label()));
        }
        self.slots[i] = Some(orbit);
        Ok(i)
    }

    /// Derive the kets and the two-body channels.
    pub fn build(self) -> Result<ModelSpace, Error> {
        let conf = self.conf;
        let orbits = self.slots.into_iter().enumerate()
            .map(|(i, slot)| slot.ok_or(Error::MissingOrbit(i)))
            .collect::<Result<Vec<_>, _>>()?;
        // Nmax may have been lowered after the orbits were added
        if let Some(o) = orbits.iter().find(|o| o.e() > conf.nmax) {
            return Err(Error::OutsideTruncation(o.label(), conf.nmax));
        }

        let kets = setup_kets(&orbits);
        let orbit_sets = OrbitSets::new(&orbits);
        let ket_sets = KetSets::new(&orbits, &kets);
        debug!("{} orbits, {} kets", orbits.len(), kets.len());

        let two_body_channels =
            setup_two_body_channels(Coupling::Standard, &conf, &kets, &orbits);
        let two_body_channels_cc =
            setup_two_body_channels(Coupling::CrossCoupled, &conf, &kets,
                                    &orbits);

        info!("model space: Nmax = {}, {} orbits, {} kets, \
               {} two-body channels",
              conf.nmax, orbits.len(), kets.len(), two_body_channels.len());
        Ok(ModelSpace {
            recoupling: Recoupling::new(conf.cache_shards),
            conf,
            orbits,
            kets,
            orbit_sets,
            ket_sets,
            two_body_channels,
            two_body_channels_cc,
            kets3: Vec::new(),
            three_body_channels: Vec::new(),
        })
    }
}

#[inline]
fn two_body_jmax(nmax: i32) -> i32 {
    2 * nmax + 1
}

/// One channel per label of the chart, admitting kets with `e2 ≤ N2max`.
fn setup_two_body_channels(
    coupling: Coupling,
    conf: &Conf,
    kets: &[Ket],
    orbits: &[Orbit],
) -> Vec<TwoBodyChannel> {
    let jmax = two_body_jmax(conf.nmax);
    let chans: Vec<_> = (0 .. channel::num_two_body_channels(jmax))
        .map(|i| {
            let label = channel::two_body_channel_label(jmax, i);
            TwoBodyChannel::new(label, coupling, kets, orbits, conf.n2max)
        })
        .collect();
    debug!("{:?} two-body channels: {} of {} nonempty (N2max = {})",
           coupling,
           chans.iter().filter(|c| c.num_kets() > 0).count(),
           chans.len(),
           conf.n2max);
    chans
}

/// Every ket `|p q⟩` with `p ≤ q`, stored at `ket::index2(p, q)`.
fn setup_kets(orbits: &[Orbit]) -> Vec<Ket> {
    let n = orbits.len();
    let mut kets = Vec::with_capacity(n * (n + 1) / 2);
    for q in 0 .. n {
        for p in 0 ..= q {
            kets.push(Ket::new(p, q, &orbits[p], &orbits[q]));
        }
    }
    kets
}

/// Orbit classification by occupation, valence space, and isospin.
#[derive(Clone, Debug, Default)]
struct OrbitSets {
    holes: Vec<usize>,
    particles: Vec<usize>,
    valence: Vec<usize>,
    qspace: Vec<usize>,
    hole_qspace: Vec<usize>,
    particle_qspace: Vec<usize>,
    protons: Vec<usize>,
    neutrons: Vec<usize>,
    one_body_channels: FnvHashMap<(i32, i32, i32), Vec<usize>>,
}

impl OrbitSets {
    fn new(orbits: &[Orbit]) -> Self {
        let mut s = Self::default();
        for (i, o) in orbits.iter().enumerate() {
            match o.occ() {
                Occ::I => s.holes.push(i),
                Occ::A => s.particles.push(i),
            }
            match o.space() {
                Space::Inside => s.valence.push(i),
                Space::Outside => {
                    s.qspace.push(i);
                    match o.occ() {
                        Occ::I => s.hole_qspace.push(i),
                        Occ::A => s.particle_qspace.push(i),
                    }
                }
            }
            if o.tz2() < 0 {
                s.protons.push(i);
            } else {
                s.neutrons.push(i);
            }
            s.one_body_channels.entry((o.l(), o.j2(), o.tz2()))
                .or_insert_with(Vec::new)
                .push(i);
        }
        s
    }
}

/// Ket classification by the occupation and space of both orbits.
#[derive(Clone, Debug, Default)]
struct KetSets {
    pp: Vec<usize>,
    ph: Vec<usize>,
    hh: Vec<usize>,
    vv: Vec<usize>,
    holeq_holeq: Vec<usize>,
    particleq_particleq: Vec<usize>,
    particleq_holeq: Vec<usize>,
    v_holeq: Vec<usize>,
    v_particleq: Vec<usize>,
}

impl KetSets {
    fn new(orbits: &[Orbit], kets: &[Ket]) -> Self {
        let mut s = Self::default();
        for (i, ket) in kets.iter().enumerate() {
            let (a, b) = (&orbits[ket.p], &orbits[ket.q]);
            match (a.occ(), b.occ()) {
                (Occ::A, Occ::A) => s.pp.push(i),
                (Occ::I, Occ::I) => s.hh.push(i),
                _ => s.ph.push(i),
            }
            match (a.space(), b.space()) {
                (Space::Inside, Space::Inside) => s.vv.push(i),
                (Space::Outside, Space::Outside) => {
                    match (a.occ(), b.occ()) {
                        (Occ::I, Occ::I) => s.holeq_holeq.push(i),
                        (Occ::A, Occ::A) => s.particleq_particleq.push(i),
                        _ => s.particleq_holeq.push(i),
                    }
                }
                _ => {
                    let outside = if a.is_qspace() { a } else { b };
                    match outside.occ() {
                        Occ::I => s.v_holeq.push(i),
                        Occ::A => s.v_particleq.push(i),
                    }
                }
            }
        }
        s
    }
}

/// Orbits, kets, symmetry channels, and recoupling caches of a
/// many-body calculation.
///
/// Cloning copies everything, including the caches.
#[derive(Clone, Debug)]
pub struct ModelSpace {
    conf: Conf,
    orbits: Vec<Orbit>,
    kets: Vec<Ket>,
    orbit_sets: OrbitSets,
    ket_sets: KetSets,
    two_body_channels: Vec<TwoBodyChannel>,
    two_body_channels_cc: Vec<TwoBodyChannel>,
    kets3: Vec<Ket3>,
    three_body_channels: Vec<ThreeBodyChannel>,
    recoupling: Recoupling,
}

impl ModelSpace {
    /// Replace the raw coefficient evaluator.  Clears all caches.
    pub fn with_evaluator(mut self, raw: Arc<dyn RawCoefficients>) -> Self {
        self.recoupling = Recoupling::with_raw(self.conf.cache_shards, raw);
        self
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    ///////////////////////////////////////////////////////////////////////
    // Truncation

    pub fn nmax(&self) -> i32 {
        self.conf.nmax
    }

    pub fn n2max(&self) -> i32 {
        self.conf.n2max
    }

    /// Rebuilds both sets of two-body channels.  Local indices obtained
    /// before the call are invalidated.
    pub fn set_n2max(&mut self, n2max: i32) {
        if n2max == self.conf.n2max {
            return;
        }
        self.conf.n2max = n2max;
        self.two_body_channels = setup_two_body_channels(
            Coupling::Standard, &self.conf, &self.kets, &self.orbits);
        self.two_body_channels_cc = setup_two_body_channels(
            Coupling::CrossCoupled, &self.conf, &self.kets, &self.orbits);
    }

    pub fn n3max(&self) -> i32 {
        self.conf.n3max
    }

    /// Takes effect at the next `setup_three_body_channels`.
    pub fn set_n3max(&mut self, n3max: i32) {
        self.conf.n3max = n3max;
    }

    pub fn hbar_omega(&self) -> f64 {
        self.conf.hbar_omega
    }

    /// Orbit energies assigned at construction are left as they are.
    pub fn set_hbar_omega(&mut self, hbar_omega: f64) {
        self.conf.hbar_omega = hbar_omega;
    }

    pub fn target_mass(&self) -> i32 {
        self.conf.target_mass
    }

    pub fn set_target_mass(&mut self, target_mass: i32) {
        self.conf.target_mass = target_mass;
    }

    /// Largest twice-j of a single orbit.
    pub fn one_body_jmax2(&self) -> i32 {
        2 * self.conf.nmax + 1
    }

    /// Largest J of a two-body channel.
    pub fn two_body_jmax(&self) -> i32 {
        two_body_jmax(self.conf.nmax)
    }

    /// Largest twice-J of a three-body channel.
    pub fn three_body_jmax2(&self) -> i32 {
        3 * self.one_body_jmax2()
    }

    ///////////////////////////////////////////////////////////////////////
    // Orbits

    pub fn num_orbits(&self) -> usize {
        self.orbits.len()
    }

    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Panics if out of range.
    pub fn orbit(&self, i: usize) -> &Orbit {
        &self.orbits[i]
    }

    pub fn get_orbit(&self, i: usize) -> Option<&Orbit> {
        self.orbits.get(i)
    }

    /// Position of the orbit with the given quantum numbers, if present.
    pub fn orbit_index(&self, n: i32, l: i32, j2: i32, tz2: i32)
                       -> Option<usize>
    {
        orbit::check_quantum_numbers(n, l, j2, tz2).ok()?;
        let i = orbit::index1(n, l, j2, tz2);
        if i < self.orbits.len() {
            Some(i)
        } else {
            None
        }
    }

    pub fn holes(&self) -> &[usize] {
        &self.orbit_sets.holes
    }

    pub fn particles(&self) -> &[usize] {
        &self.orbit_sets.particles
    }

    pub fn valence(&self) -> &[usize] {
        &self.orbit_sets.valence
    }

    pub fn qspace(&self) -> &[usize] {
        &self.orbit_sets.qspace
    }

    /// Holes outside the valence space (the core).
    pub fn hole_qspace(&self) -> &[usize] {
        &self.orbit_sets.hole_qspace
    }

    /// Particles outside the valence space.
    pub fn particle_qspace(&self) -> &[usize] {
        &self.orbit_sets.particle_qspace
    }

    pub fn proton_orbits(&self) -> &[usize] {
        &self.orbit_sets.protons
    }

    pub fn neutron_orbits(&self) -> &[usize] {
        &self.orbit_sets.neutrons
    }

    /// Orbits sharing `(l, j2, tz2)`, in ascending order of `n`.
    pub fn one_body_channel(&self, l: i32, j2: i32, tz2: i32) -> &[usize] {
        self.orbit_sets.one_body_channels.get(&(l, j2, tz2))
            .map(|v| &v[..])
            .unwrap_or(&[])
    }

    ///////////////////////////////////////////////////////////////////////
    // Two-body kets

    pub fn num_kets(&self) -> usize {
        self.kets.len()
    }

    pub fn kets(&self) -> &[Ket] {
        &self.kets
    }

    /// Panics if out of range.
    pub fn ket(&self, i: usize) -> &Ket {
        &self.kets[i]
    }

    pub fn get_ket(&self, i: usize) -> Option<&Ket> {
        self.kets.get(i)
    }

    /// Position of `|p q⟩`.  Requires `p ≤ q < num_orbits`.
    pub fn ket_index(&self, p: usize, q: usize) -> usize {
        assert!(p <= q && q < self.orbits.len(),
                "invalid ket ({}, {}) for {} orbits", p, q,
                self.orbits.len());
        ket::index2(p, q)
    }

    /// Requires `p ≤ q < num_orbits`.
    pub fn ket_pq(&self, p: usize, q: usize) -> &Ket {
        &self.kets[self.ket_index(p, q)]
    }

    pub fn ket_index_pp(&self) -> &[usize] {
        &self.ket_sets.pp
    }

    pub fn ket_index_ph(&self) -> &[usize] {
        &self.ket_sets.ph
    }

    pub fn ket_index_hh(&self) -> &[usize] {
        &self.ket_sets.hh
    }

    pub fn ket_index_vv(&self) -> &[usize] {
        &self.ket_sets.vv
    }

    pub fn ket_index_holeq_holeq(&self) -> &[usize] {
        &self.ket_sets.holeq_holeq
    }

    pub fn ket_index_particleq_particleq(&self) -> &[usize] {
        &self.ket_sets.particleq_particleq
    }

    pub fn ket_index_particleq_holeq(&self) -> &[usize] {
        &self.ket_sets.particleq_holeq
    }

    pub fn ket_index_v_holeq(&self) -> &[usize] {
        &self.ket_sets.v_holeq
    }

    pub fn ket_index_v_particleq(&self) -> &[usize] {
        &self.ket_sets.v_particleq
    }

    ///////////////////////////////////////////////////////////////////////
    // Two-body channels

    pub fn num_two_body_channels(&self) -> usize {
        self.two_body_channels.len()
    }

    pub fn two_body_channel_index(&self, j: i32, parity: Parity, tz: i32)
                                  -> Option<usize>
    {
        channel::two_body_channel_index(self.two_body_jmax(),
                                        TwoBodyLabel { j, parity, tz })
    }

    /// Panics if out of range.
    pub fn two_body_channel(&self, ch: usize) -> TwoBodyChannelView {
        TwoBodyChannelView::new(self, &self.two_body_channels[ch])
    }

    /// Cross-coupled channel with the same numbering.  Panics if out of
    /// range.
    pub fn two_body_channel_cc(&self, ch: usize) -> TwoBodyChannelView {
        TwoBodyChannelView::new(self, &self.two_body_channels_cc[ch])
    }

    pub fn two_body_channels(&self)
        -> impl Iterator<Item = TwoBodyChannelView<'_>> + '_
    {
        self.two_body_channels.iter()
            .map(move |c| TwoBodyChannelView::new(self, c))
    }

    pub fn two_body_channels_cc(&self)
        -> impl Iterator<Item = TwoBodyChannelView<'_>> + '_
    {
        self.two_body_channels_cc.iter()
            .map(move |c| TwoBodyChannelView::new(self, c))
    }

    ///////////////////////////////////////////////////////////////////////
    // Three-body kets and channels

    /// (Re)build the three-body kets and channels using the current
    /// `N3max`.
    pub fn setup_three_body_channels(&mut self) {
        let orbits = &self.orbits;
        let n = orbits.len();
        let mut kets3 = Vec::with_capacity(n * (n + 1) * (n + 2) / 6);
        let mut groups: FnvHashMap<(Parity, i32), Vec<usize>> =
            Default::default();
        for r in 0 .. n {
            for q in 0 ..= r {
                for p in 0 ..= q {
                    let ket = Ket3::new((p, q, r),
                                        (&orbits[p], &orbits[q], &orbits[r]));
                    groups.entry((ket.parity, ket.tz2))
                        .or_insert_with(Vec::new)
                        .push(kets3.len());
                    kets3.push(ket);
                }
            }
        }
        let chart = self.three_body_chart();
        let n3max = self.conf.n3max;
        let channels: Vec<_> = (0 .. chart.len()).map(|i| {
            let label = chart.label(i);
            let candidates = groups.get(&(label.parity, label.tz2))
                .map(|v| &v[..])
                .unwrap_or(&[]);
            ThreeBodyChannel::new(label, &kets3, candidates, orbits, n3max)
        }).collect();
        info!("three-body: N3max = {}, {} kets, {} channels ({} nonempty)",
              n3max, kets3.len(), channels.len(),
              channels.iter().filter(|c| c.num_kets() > 0).count());
        self.kets3 = kets3;
        self.three_body_channels = channels;
    }

    fn three_body_chart(&self) -> ThreeBodyChart {
        ThreeBodyChart {
            jpq_max: self.two_body_jmax(),
            j2_max: self.three_body_jmax2(),
        }
    }

    /// Zero until `setup_three_body_channels` is called.
    pub fn num_kets3(&self) -> usize {
        self.kets3.len()
    }

    /// Panics if out of range.
    pub fn ket3(&self, i: usize) -> &Ket3 {
        &self.kets3[i]
    }

    /// Position of `|p q r⟩`.  Requires `p ≤ q ≤ r < num_orbits`.
    pub fn ket3_index(&self, p: usize, q: usize, r: usize) -> usize {
        assert!(p <= q && q <= r && r < self.orbits.len(),
                "invalid ket ({}, {}, {}) for {} orbits", p, q, r,
                self.orbits.len());
        ket::index3(p, q, r)
    }

    /// Zero until `setup_three_body_channels` is called.
    pub fn num_three_body_channels(&self) -> usize {
        self.three_body_channels.len()
    }

    pub fn three_body_channel_index(
        &self,
        jpq: i32,
        j2: i32,
        parity: Parity,
        tz2: i32,
    ) -> Option<usize> {
        if self.three_body_channels.is_empty() {
            return None;
        }
        self.three_body_chart()
            .index(ThreeBodyLabel { jpq, j2, parity, tz2 })
    }

    /// Panics if out of range.
    pub fn three_body_channel(&self, ch: usize) -> ThreeBodyChannelView {
        ThreeBodyChannelView::new(self, &self.three_body_channels[ch])
    }

    ///////////////////////////////////////////////////////////////////////
    // Recoupling coefficients

    pub fn recoupling(&self) -> &Recoupling {
        &self.recoupling
    }

    pub fn six_j(&self, args: SixJ) -> f64 {
        self.recoupling.six_j(args)
    }

    pub fn nine_j(&self, args: NineJ) -> f64 {
        self.recoupling.nine_j(args)
    }

    pub fn moshinsky(&self, args: Moshinsky) -> f64 {
        self.recoupling.moshinsky(args)
    }

    pub fn six_j_is_empty(&self) -> bool {
        self.recoupling.six_j_is_empty()
    }

    /// Fill the Moshinsky cache up to `max(N2max, N3max)` quanta.
    pub fn precalculate_moshinsky(&self) -> usize {
        let e_max = self.conf.n2max.max(self.conf.n3max);
        self.recoupling.precalculate_moshinsky(e_max)
    }
}
