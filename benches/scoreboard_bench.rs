use criterion::{criterion_group, criterion_main, Criterion};
use mvcstone::{Controller, Criteria, Datapack, Operation, Scoreboard};

fn benchmark_literal_cache(c: &mut Criterion) {
    c.bench_function("calculate with cached literal", |b| {
        let mut datapack = Datapack::new("bench");
        let mut scoreboard = Scoreboard::new(&mut datapack, "points", Criteria::Dummy);
        b.iter(|| {
            scoreboard.calculate(&mut datapack, "@s", Operation::Add, 5).unwrap();
        })
    });
}

fn benchmark_many_literals(c: &mut Criterion) {
    c.bench_function("register 1000 literals", |b| {
        b.iter(|| {
            let mut datapack = Datapack::new("bench");
            let mut scoreboard = Scoreboard::new(&mut datapack, "points", Criteria::Dummy);
            for value in 0..1000 {
                scoreboard.set_absolute(&mut datapack, value);
            }
            datapack
        })
    });
}

fn benchmark_controller(c: &mut Criterion) {
    c.bench_function("register controller with 100 handlers", |b| {
        b.iter(|| {
            let mut datapack = Datapack::new("bench");
            let mut controller = Controller::new("Bench", ()).prefix("bench/");
            for i in 0..100 {
                controller = controller.function(&format!("fn_{}", i), move |_, dp| {
                    dp.emit(format!("say {}", i));
                    Ok(())
                });
            }
            controller.register_all(&mut datapack).unwrap();
            datapack
        })
    });
}

criterion_group!(benches, benchmark_literal_cache, benchmark_many_literals, benchmark_controller);
criterion_main!(benches);
