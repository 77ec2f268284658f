//! Resolution and dispatch benchmarks.
//!
//! Run with: `cargo bench -p covenant-dispatch`

use bytes::Bytes;
use covenant_core::{
    handler, merge, resolve, ContractTree, ImplementationTree, Node, Response,
    ResponseExt, RouteContract, Schema,
};
use covenant_dispatch::{DispatchOptions, Dispatcher};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::{Method, StatusCode};
use http_body_util::Full;

fn build_trees(groups: usize) -> (ContractTree, ImplementationTree) {
    let contract = Node::branch((0..groups).map(|i| {
        (
            format!("resource{i}"),
            Node::branch([
                (
                    "list",
                    Node::leaf(RouteContract::builder(Method::GET, &format!("/resource{i}")).build()),
                ),
                (
                    "get",
                    Node::leaf(
                        RouteContract::builder(Method::GET, &format!("/resource{i}/:id"))
                            .path_params(Schema::object([("id", Schema::integer().coerce())]))
                            .build(),
                    ),
                ),
            ]),
        )
    }));

    let implementation = Node::branch((0..groups).map(|i| {
        let ok = handler(|_req| async { Ok(Response::text(StatusCode::OK, "ok")) });
        (
            format!("resource{i}"),
            Node::branch([("list", Node::leaf(ok.clone())), ("get", Node::leaf(ok))]),
        )
    }));

    (contract, implementation)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_last_route");

    for groups in [5, 50, 250] {
        let (contract, implementation) = build_trees(groups);
        let tree = merge(&contract, &implementation).unwrap();
        let path = format!("/resource{}/42", groups - 1);

        group.bench_with_input(BenchmarkId::from_parameter(groups), &path, |b, path| {
            b.iter(|| black_box(resolve(&tree, black_box(path), &Method::GET).is_some()));
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let (contract, implementation) = build_trees(50);
    let dispatcher =
        Dispatcher::new(&contract, &implementation, DispatchOptions::default()).unwrap();

    c.bench_function("dispatch_validated_get", |b| {
        b.iter(|| {
            let request = http::Request::builder()
                .uri("/resource25/42")
                .body(Full::new(Bytes::new()))
                .unwrap();
            black_box(runtime.block_on(dispatcher.dispatch(request)).is_ok());
        });
    });
}

criterion_group!(benches, bench_resolve, bench_dispatch);
criterion_main!(benches);
