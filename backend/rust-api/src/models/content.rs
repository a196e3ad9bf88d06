use super::Step;

pub const TOTAL_ITEMS: usize = 10;
pub const MAX_SCORE: u32 = 100;

/// Muscle contraction (sliding filament theory), in canonical order.
pub const RAW_STEPS: [&str; TOTAL_ITEMS] = [
    "Motorische impuls vanuit hersenen of ruggenmerg",
    "Zenuwuiteinde scheidt acetylcholine uit",
    "Calcium (Ca2+) komt vrij in spiervezel",
    "Bindingsplaats op actine komt vrij",
    "Myosinekopje bindt aan bindingsplaats op actine",
    "Myosinekopje klapt om (‘power stroke’)",
    "ATP bindt aan Myosine",
    "Myosine ontkoppelt van de actine",
    "ATP splitst in ADP + P",
    "Myosine gaat terug naar de beginpositie",
];

pub fn step_id(index: usize) -> String {
    format!("item-{}", index)
}

pub fn canonical_steps() -> Vec<Step> {
    RAW_STEPS
        .iter()
        .enumerate()
        .map(|(index, content)| Step {
            id: step_id(index),
            content: content.to_string(),
            correct_index: index,
            is_locked: false,
        })
        .collect()
}
