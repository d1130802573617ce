#![allow(dead_code)]

use std::rc::Rc;

use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wirebox::{ClassRegistry, ContainerId};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[derive(Debug)]
pub struct Engine {
    pub horsepower: i64,
}

#[derive(Debug)]
pub struct Producer {
    pub name: String,
}

#[derive(Debug)]
pub struct Car {
    pub engine: Rc<Engine>,
    pub producer: Rc<Producer>,
    pub color: Option<String>,
}

#[derive(Debug)]
pub struct Registry {
    pub owner: ContainerId,
}

pub fn classes() -> ClassRegistry {
    let mut classes = ClassRegistry::new();
    classes.class("Engine", |args| {
        Ok(Engine {
            horsepower: args.int(0)?,
        })
    });
    classes.class("Producer", |args| {
        Ok(Producer {
            name: args.string(0)?,
        })
    });
    classes
        .class("Car", |args| {
            Ok(Car {
                engine: args.instance::<Engine>(0)?,
                producer: args.instance::<Producer>(1)?,
                color: None,
            })
        })
        .method("setColor", |car: &mut Car, args| {
            car.color = Some(args.string(0)?);
            Ok(())
        });
    classes.class("Registry", |args| {
        Ok(Registry {
            owner: args.container(0)?,
        })
    });
    classes
}
