use divan::{black_box, Bencher};
use linemerge::{compute_diff, enumerate_hunks, DiffSession, MergeDirection, Merger};

fn main() {
    divan::main();
}

fn load_fixture(name: &str) -> String {
    let path = format!("fixtures/sql/{}", name);
    std::fs::read_to_string(path).unwrap()
}

#[divan::bench(args = [1, 10, 50])]
fn apply_first_hunk(bencher: Bencher, copies: usize) {
    let old = load_fixture("proc_before.sql").repeat(copies);
    let new = load_fixture("proc_after.sql").repeat(copies);
    let diff = compute_diff(&old, &new);
    let hunk = enumerate_hunks(&diff)[0];

    bencher.bench_local(|| {
        black_box(Merger::new(&diff).apply(
            black_box(&hunk),
            MergeDirection::NewToOld,
            &old,
            &new,
        ))
    });
}

// Merge followed by the full recompute a two-pane view performs
#[divan::bench(args = [1, 10])]
fn session_merge_all(bencher: Bencher, copies: usize) {
    let old = load_fixture("proc_before.sql").repeat(copies);
    let new = load_fixture("proc_after.sql").repeat(copies);

    bencher
        .with_inputs(|| DiffSession::new(old.clone(), new.clone()))
        .bench_local_values(|mut session| {
            while let Some(action) = session
                .actions()
                .into_iter()
                .find(|a| a.direction == MergeDirection::NewToOld && !a.hunk.is_deletion())
            {
                session.merge(&action);
            }
            black_box(session)
        });
}
