//! Finding the lexicographically smallest task mapping in an orbit under an
//! automorphism group: the actual canonicalisation work behind
//! [`super::ArchGraphSystem::repr`].

use super::{
    repr_options::{
        LocalSearchVariant,
        ReprMethod,
        ReprOptions,
    },
    task_mapping::TaskMapping,
    task_orbits::TaskOrbits,
};
use crate::{
    group::{
        orbit::PermutationSet,
        PermGroup,
    },
    perm::{
        Permutation,
        StandardPermutation,
    },
    DetHashSet,
};
use num::traits::One;
use num_bigint::BigUint;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// `true` iff `options` lets a search short-circuit on `mapping` and
/// `orbits` already knows it to be a representative.
fn is_repr(mapping: &TaskMapping, orbits: Option<&TaskOrbits>, options: &ReprOptions) -> bool {
    options.match_known_representatives && orbits.is_some_and(|o| o.is_repr(mapping))
}

fn factorial(n: usize) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, i| acc * BigUint::from(i))
}

/// `true` iff `automorphisms` is the full symmetric group on the window
/// `[smp, lmp]`, i.e. every permutation of that window's points is realised
/// and nothing outside it is moved.
fn is_symmetric_on_window(automorphisms: &PermGroup<StandardPermutation>, smp: usize, lmp: usize) -> bool {
    automorphisms.order() == factorial(lmp - smp + 1)
}

/// The canonical representative of `mapping`'s orbit under `automorphisms`,
/// found by whichever strategy `options.method` names.
///
/// If `automorphisms` is (known to be) the full symmetric group on the
/// window `[smp + offset, lmp + offset]` of its moved points and
/// `options.symmetric_shortcut` is set, a cheap renumbering is used instead
/// of any search.
pub fn representative(
    automorphisms: &PermGroup<StandardPermutation>,
    mapping: &TaskMapping,
    orbits: Option<&mut TaskOrbits>,
    options: &ReprOptions,
) -> TaskMapping {
    let perm_set = PermutationSet::from_vec(automorphisms.generators().to_vec());
    let window = perm_set
        .smallest_moved_point()
        .zip(perm_set.largest_moved_point())
        .filter(|&(smp, lmp)| options.symmetric_shortcut && is_symmetric_on_window(automorphisms, smp, lmp));

    let representative = if let Some((smp, lmp)) = window {
        min_elem_symmetric(mapping, smp + options.offset, lmp + options.offset)
    } else {
        let task_min = options.offset;
        let task_max = automorphisms.degree().saturating_sub(1) + options.offset;
        match options.method {
            ReprMethod::Iterate => min_elem_iterate(automorphisms, mapping, orbits.as_deref(), options),
            ReprMethod::Orbits => min_elem_orbits(automorphisms, mapping, orbits.as_deref(), options),
            ReprMethod::LocalSearch(variant) => min_elem_local_search(automorphisms, mapping, variant, options),
            ReprMethod::LocalSearchSaLinear => {
                min_elem_local_search_sa(automorphisms, mapping, options, task_min, task_max)
            }
        }
    };

    if let Some(orbits) = orbits {
        orbits.insert(representative.clone());
    }

    representative
}

fn min_elem_iterate(
    automorphisms: &PermGroup<StandardPermutation>,
    mapping: &TaskMapping,
    orbits: Option<&TaskOrbits>,
    options: &ReprOptions,
) -> TaskMapping {
    let mut representative = mapping.clone();

    for element in automorphisms.elements() {
        let candidate = mapping.permute(&element);
        if candidate.less_than(&representative) {
            representative = candidate;
        }
        if is_repr(&representative, orbits, options) {
            return representative;
        }
    }

    representative
}

fn min_elem_orbits(
    automorphisms: &PermGroup<StandardPermutation>,
    mapping: &TaskMapping,
    orbits: Option<&TaskOrbits>,
    options: &ReprOptions,
) -> TaskMapping {
    let generators = automorphisms.generators();

    let mut representative = mapping.clone();
    let mut processed: DetHashSet<TaskMapping> = DetHashSet::default();
    let mut unprocessed: VecDeque<TaskMapping> = VecDeque::new();
    unprocessed.push_back(mapping.clone());

    while let Some(current) = unprocessed.pop_front() {
        if processed.contains(&current) {
            continue;
        }
        processed.insert(current.clone());

        if current.less_than(&representative) {
            representative = current.clone();
        }

        for gen in generators {
            let next = current.permute(gen);
            if is_repr(&next, orbits, options) {
                return next;
            }
            if !processed.contains(&next) {
                unprocessed.push_back(next);
            }
        }
    }

    representative
}

/// The generating set a local-search descent tries moves from: the group's
/// own generators, optionally widened with each generator's inverse, and
/// topped up with extra random automorphisms to offer more escape routes.
fn local_search_augment_gens(automorphisms: &PermGroup<StandardPermutation>, options: &ReprOptions) -> Vec<StandardPermutation> {
    let mut gens = automorphisms.generators().to_vec();
    if options.local_search_invert_generators {
        let inverses: Vec<StandardPermutation> = automorphisms.generators().iter().map(Permutation::inv).collect();
        gens.extend(inverses);
    }
    for _ in 0..options.local_search_append_generators {
        gens.push(automorphisms.random_element());
    }
    gens
}

fn min_elem_local_search(
    automorphisms: &PermGroup<StandardPermutation>,
    mapping: &TaskMapping,
    variant: LocalSearchVariant,
    options: &ReprOptions,
) -> TaskMapping {
    let generators = local_search_augment_gens(automorphisms, options);

    let mut representative = mapping.clone();

    loop {
        let mut stationary = true;
        let mut candidates = Vec::new();

        for gen in &generators {
            let candidate = representative.permute(gen);
            if candidate.less_than(&representative) {
                stationary = false;
                match variant {
                    LocalSearchVariant::Bfs => candidates.push(candidate),
                    LocalSearchVariant::Dfs => representative = candidate,
                }
            }
        }

        if stationary {
            break;
        }

        if variant == LocalSearchVariant::Bfs {
            if let Some(best) = candidates.into_iter().min_by(|a, b| {
                if a.less_than(b) {
                    std::cmp::Ordering::Less
                } else if b.less_than(a) {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            }) {
                representative = best;
            }
        }
    }

    representative
}

fn min_elem_local_search_sa(
    automorphisms: &PermGroup<StandardPermutation>,
    mapping: &TaskMapping,
    options: &ReprOptions,
    task_min: usize,
    task_max: usize,
) -> TaskMapping {
    let generators = local_search_augment_gens(automorphisms, options);
    if generators.is_empty() {
        return mapping.clone();
    }

    let mut rng = rand::thread_rng();

    let mut representative = mapping.clone();
    let mut representative_value = sa_value(&representative, task_min, task_max);

    for i in 0..options.sa_iterations {
        let temperature = sa_schedule(i, options);

        let mut order: Vec<usize> = (0..generators.len()).collect();
        order.shuffle(&mut rng);

        let mut next = representative.clone();
        for idx in order {
            let candidate = representative.permute(&generators[idx]);
            if candidate != representative {
                next = candidate;
                break;
            }
        }

        let next_value = sa_value(&next, task_min, task_max);
        let delta = next_value - representative_value;

        if delta <= 0.0 || rand::Rng::gen_range(&mut rng, 0.0..1.0) >= (-delta / temperature.max(f64::EPSILON)).exp() {
            representative = next;
            representative_value = next_value;
        }
    }

    representative
}

fn sa_schedule(i: usize, options: &ReprOptions) -> f64 {
    let i = i as f64;
    let i_max = options.sa_iterations as f64;
    let scale = (i_max - i - 1.0) / i_max;
    scale * options.sa_initial_temperature
}

/// Lower is better: a mixed-radix reading of the tasks within
/// `[task_min, task_max]`, rightmost (least significant) task first,
/// compressed through a log so the annealing schedule's acceptance
/// probability stays well-scaled across mapping lengths.
fn sa_value(mapping: &TaskMapping, task_min: usize, task_max: usize) -> f64 {
    let window = task_max - task_min + 1;
    let mult_base = window as f64;

    let mut total = 0.0_f64;
    let mut mult = 1.0_f64;
    let mut num_tasks = 0usize;

    for &task in mapping.as_slice().iter().rev() {
        if task < task_min || task > task_max {
            continue;
        }
        total += mult * (task_max - task) as f64;
        mult *= mult_base;
        num_tasks += 1;
        if num_tasks == window {
            break;
        }
    }

    (total - (task_max - task_min) as f64).ln() / num_tasks as f64
}

/// The trivial canonicalisation available when the automorphism group is the
/// full symmetric group on `[task_min, task_max]`: renumber that window's
/// processing elements by first occurrence, leaving everything outside it
/// untouched.
fn min_elem_symmetric(mapping: &TaskMapping, task_min: usize, task_max: usize) -> TaskMapping {
    let window = task_max - task_min + 1;
    let mut renumber: Vec<Option<usize>> = vec![None; window];
    let mut next = task_min;

    let renumbered: Vec<usize> = mapping
        .as_slice()
        .iter()
        .map(|&pe| {
            if pe < task_min || pe > task_max {
                return pe;
            }
            *renumber[pe - task_min].get_or_insert_with(|| {
                let assigned = next;
                next += 1;
                assigned
            })
        })
        .collect();

    TaskMapping::new(renumbered)
}

/// Every task mapping reachable from `mapping` by repeatedly applying
/// automorphism generators.
pub fn orbit(automorphisms: &PermGroup<StandardPermutation>, mapping: &TaskMapping) -> DetHashSet<TaskMapping> {
    let generators = automorphisms.generators();

    let mut seen: DetHashSet<TaskMapping> = DetHashSet::default();
    let mut unprocessed: VecDeque<TaskMapping> = VecDeque::new();
    unprocessed.push_back(mapping.clone());

    while let Some(current) = unprocessed.pop_front() {
        if !seen.insert(current.clone()) {
            continue;
        }
        for gen in generators {
            let next = current.permute(gen);
            if !seen.contains(&next) {
                unprocessed.push_back(next);
            }
        }
    }

    seen
}
