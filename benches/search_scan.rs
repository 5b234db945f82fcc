use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use medieval_character_manager::models::{CharacterRecord, Relationship, TimelineEvent};
use medieval_character_manager::{Roster, SearchEngine};

/// Generate a roster with varied text so queries hit a realistic share of fields
fn generate_roster(num_characters: usize) -> Roster {
    let trades = ["Miller", "Smith", "Archer", "Monk", "Herbalist", "Knight", "Tanner"];
    let places = ["Highkeep", "Lowmarket", "Saint Brannoc Abbey", "Ashford", "the Marches"];

    let characters = (0..num_characters)
        .map(|i| {
            let mut c = CharacterRecord::new(format!("c{}", i), format!("Character {}", i));
            c.occupation = trades[i % trades.len()].to_string();
            c.location = places[i % places.len()].to_string();
            c.background = format!(
                "{} years in {} before the storm of {} took the harvest and the mill.",
                i % 40,
                places[(i + 1) % places.len()],
                1190 + i % 30
            );
            c.personality = "Stubborn but fair".to_string();
            c.motivations = "Keep the family land".to_string();
            c.relationships.push(Relationship {
                target_name: format!("Character {}", i + 1),
                relationship_type: "Sibling".to_string(),
                description: "Shares the family plot".to_string(),
            });
            c.timeline_events.push(TimelineEvent {
                title: "Great Storm".to_string(),
                date: format!("{}", 1190 + i % 30),
                description: "Lost the barn".to_string(),
                tags: vec!["storm".to_string(), "loss".to_string()],
            });
            c
        })
        .collect();

    Roster::new(characters)
}

fn bench_search_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_scan");
    let engine = SearchEngine::default();

    // Query present in most characters
    for size in [100, 1_000, 10_000].iter() {
        let roster = generate_roster(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("common_term", size), size, |b, _| {
            b.iter(|| engine.search(black_box("storm"), black_box(&roster)));
        });
    }

    // Query present nowhere (full scan, no snippets)
    for size in [100, 1_000, 10_000].iter() {
        let roster = generate_roster(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("no_match", size), size, |b, _| {
            b.iter(|| engine.search(black_box("zzz_not_present"), black_box(&roster)));
        });
    }

    // Below the minimum length: must not touch the roster
    let roster = generate_roster(10_000);
    group.bench_function("short_query", |b| {
        b.iter(|| engine.search(black_box("s"), black_box(&roster)));
    });

    group.finish();
}

criterion_group!(benches, bench_search_scan);
criterion_main!(benches);
