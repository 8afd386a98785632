//! Test utilities: on-disk Go module fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use circuitgen_core::types::{NamedRef, TypeShape};
use circuitgen_core::{Universe, type_string};
use tempfile::TempDir;

use crate::loader::{LoadResult, load_packages};

pub const MODULE: &str = "example.com/app";

/// Package `svc` with an interface touching several packages.
pub const PUBLISHER_GO: &str = indoc::indoc! {r#"
    package svc

    import (
    	"context"

    	"example.com/app/model"
    	"example.com/app/rep"
    )

    // Seed is a test type
    type Seed string

    type Grant struct {
    	Name string
    }

    type TopicsList struct {
    	List []string
    }

    type Publisher interface {
    	PublishWithResult(context.Context, rep.PublishInput) (*model.Result, error)
    	Publish(context.Context, map[Seed][][]Grant, TopicsList, ...rep.PublishOption) error
    	Close() error
    }
"#};

pub const REP_GO: &str = indoc::indoc! {r#"
    package rep

    type PublishInput struct {
    	Topic string
    }

    type PublishOption func(*PublishInput)
"#};

pub const MODEL_GO: &str = indoc::indoc! {r#"
    package model

    type Result struct {
    	ID string `json:"id"`
    }
"#};

/// Package `svc` with a struct whose methods have mixed receivers.
pub const AGGREGATOR_GO: &str = indoc::indoc! {r#"
    package svc

    import (
    	"context"
    )

    type Aggregator struct {
    	IncSumError error
    	sum         int
    }

    func (a *Aggregator) IncSum(ctx context.Context, v int) error {
    	a.sum += v
    	return a.IncSumError
    }

    func (a Aggregator) Sum() int {
    	return a.sum
    }

    func (a *Aggregator) privateIncSum(_ context.Context, v int) error {
    	a.sum += v
    	return a.IncSumError
    }
"#};

/// A Go module laid out in a temporary directory.
pub struct GoModuleFixture {
    dir: TempDir,
}

impl GoModuleFixture {
    pub fn new(module: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("go.mod"), format!("module {module}\n\ngo 1.21\n")).unwrap();
        Self { dir }
    }

    /// The publisher/aggregator module used across tests.
    pub fn sample() -> Self {
        Self::new(MODULE)
            .file("svc/publisher.go", PUBLISHER_GO)
            .file("svc/aggregator.go", AGGREGATOR_GO)
            .file("rep/rep.go", REP_GO)
            .file("model/model.go", MODEL_GO)
    }

    pub fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        rel.split('/').fold(self.dir.path().to_path_buf(), |p, e| p.join(e))
    }

    pub fn load(&self, dirs: &[&str]) -> LoadResult {
        let dirs: Vec<PathBuf> = dirs.iter().map(|d| self.path(d)).collect();
        load_packages(&dirs).unwrap()
    }
}

/// Import path of a package of the fixture module.
pub fn pkg(rel: &str) -> String {
    format!("{MODULE}/{rel}")
}

pub fn named(rel: &str, name: &str) -> TypeShape {
    TypeShape::Named(NamedRef::new(pkg(rel), name))
}

/// Declared type of `name` in package `rel`, qualified by package name.
pub fn describe(universe: &Universe, rel: &str, name: &str) -> String {
    let decl = universe
        .package(&pkg(rel))
        .and_then(|p| p.get(name))
        .unwrap_or_else(|| panic!("{rel}.{name} not declared"));
    type_string(&decl.ty, &|path| universe.package_name(path))
}
