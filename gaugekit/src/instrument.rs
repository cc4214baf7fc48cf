// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instruments: a canvas, its registers, and the gauges they drive.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};

use hashbrown::{HashMap, HashSet};

use crate::art::Art;
use crate::error::{BuildError, InstrumentError};
use crate::gauge::{GaugeSpec, describe};
use crate::register::{Register, RegisterSpec};
use crate::surface::{NodeId, Surface};
use crate::transform::Canvas;

/// Declarative description of a whole instrument.
#[derive(Clone, Debug)]
pub struct InstrumentSpec {
    /// Root class.
    pub class: String,
    /// Canvas dimensions.
    pub canvas: Canvas,
    /// Registers, in index order.
    pub registers: Vec<RegisterSpec>,
    /// Gauges, in paint order.
    pub gauges: Vec<GaugeSpec>,
    /// Art beneath the face.
    pub base: Option<Art>,
    /// The face, beneath all gauges.
    pub face: Option<Art>,
    /// Art above all gauges.
    pub top: Option<Art>,
}

impl Default for InstrumentSpec {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

impl InstrumentSpec {
    /// Creates an instrument with one default register, one default gauge, and the standard
    /// box, face and bezel art for `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            class: String::from("instrument"),
            canvas,
            registers: alloc::vec![RegisterSpec::default()],
            gauges: alloc::vec![GaugeSpec::default()],
            base: Some(Art::instrument_box(canvas)),
            face: Some(Art::face(canvas)),
            top: Some(Art::bezel(canvas)),
        }
    }

    /// Sets the root class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Replaces the registers.
    pub fn with_registers(mut self, registers: impl IntoIterator<Item = RegisterSpec>) -> Self {
        self.registers = registers.into_iter().collect();
        self
    }

    /// Replaces the gauges.
    pub fn with_gauges(mut self, gauges: impl IntoIterator<Item = GaugeSpec>) -> Self {
        self.gauges = gauges.into_iter().collect();
        self
    }

    /// Sets (or clears) the base art.
    pub fn with_base(mut self, art: Option<Art>) -> Self {
        self.base = art;
        self
    }

    /// Sets (or clears) the face art.
    pub fn with_face(mut self, art: Option<Art>) -> Self {
        self.face = art;
        self
    }

    /// Sets (or clears) the top art.
    pub fn with_top(mut self, art: Option<Art>) -> Self {
        self.top = art;
        self
    }

    /// Renders the instrument onto `surface`, binds every gauge, and sets each register to its
    /// initial value.
    pub fn build<S: Surface + 'static>(&self, surface: S) -> Result<Instrument<S>, BuildError> {
        let accessors = self.accessor_table()?;
        let registers: Vec<Register> =
            self.registers.iter().map(RegisterSpec::instantiate).collect();
        let surface = Rc::new(RefCell::new(surface));
        log::debug!(
            "building `{}`: {} registers, {} gauges",
            self.class,
            registers.len(),
            self.gauges.len()
        );

        let root = {
            let mut s = surface.borrow_mut();
            let root = s.root();
            s.set_attribute(root, "class", self.class.clone());
            s.set_attribute(root, "width", String::from("100%"));
            s.set_attribute(root, "height", String::from("100%"));
            s.set_attribute(root, "viewBox", self.canvas.view_box());
            if let Some(base) = &self.base {
                base.render(&mut *s, root);
            }
            if let Some(face) = &self.face {
                face.render(&mut *s, root);
            }
            root
        };

        let mut gauges = Vec::with_capacity(self.gauges.len());
        let mut toggles = HashMap::new();
        for (index, spec) in self.gauges.iter().enumerate() {
            let group = spec.build(index, &surface, root, &registers, self.canvas)?;
            log::debug!("{} built", describe(index, spec));
            if let Some(name) = &spec.show_name {
                toggles.insert(name.clone(), group);
            }
            gauges.push(group);
        }

        if let Some(top) = &self.top {
            top.render(&mut *surface.borrow_mut(), root);
        }

        for (register, spec) in registers.iter().zip(&self.registers) {
            register.set_value(spec.initial_value());
        }

        Ok(Instrument {
            surface,
            registers,
            setters: accessors.setters,
            getters: accessors.getters,
            toggles,
            gauges,
        })
    }

    fn accessor_table(&self) -> Result<Accessors, BuildError> {
        let mut accessors = Accessors::default();
        let mut claim = |name: &str| -> Result<(), BuildError> {
            if !accessors.names.insert(String::from(name)) {
                return Err(BuildError::DuplicateAccessor(name.into()));
            }
            Ok(())
        };
        for (index, spec) in self.registers.iter().enumerate() {
            if !spec.has_valid_bounds() {
                return Err(BuildError::InvalidRegisterBounds {
                    register: index,
                    min: spec.min_value,
                    max: spec.max_value,
                });
            }
            claim(&spec.set_name)?;
            claim(&spec.get_name)?;
        }
        for spec in &self.gauges {
            if let Some(name) = &spec.show_name {
                claim(name)?;
            }
        }
        for (index, spec) in self.registers.iter().enumerate() {
            accessors.setters.insert(spec.set_name.clone(), index);
            accessors.getters.insert(spec.get_name.clone(), index);
        }
        Ok(accessors)
    }
}

#[derive(Default)]
struct Accessors {
    names: HashSet<String>,
    setters: HashMap<String, usize>,
    getters: HashMap<String, usize>,
}

/// A built, live instrument.
///
/// Registers are set through the named accessors; every change synchronously updates the
/// indicator transforms on the surface.
pub struct Instrument<S> {
    surface: Rc<RefCell<S>>,
    registers: Vec<Register>,
    setters: HashMap<String, usize>,
    getters: HashMap<String, usize>,
    toggles: HashMap<String, NodeId>,
    gauges: Vec<NodeId>,
}

impl<S> core::fmt::Debug for Instrument<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Instrument")
            .field("registers", &self.registers)
            .field("setters", &self.setters)
            .field("getters", &self.getters)
            .field("toggles", &self.toggles)
            .field("gauges", &self.gauges)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Instrument<S> {
    /// Sets the register behind setter `name`; returns the stored (clamped) value.
    pub fn set(&self, name: &str, value: f64) -> Result<f64, InstrumentError> {
        let index = self
            .setters
            .get(name)
            .ok_or_else(|| InstrumentError::UnknownAccessor(name.into()))?;
        Ok(self.registers[*index].set_value(value))
    }

    /// Reads the register behind getter `name`.
    pub fn get(&self, name: &str) -> Result<f64, InstrumentError> {
        let index = self
            .getters
            .get(name)
            .ok_or_else(|| InstrumentError::UnknownAccessor(name.into()))?;
        Ok(self.registers[*index].get_value())
    }

    /// Shows or hides the gauge exposed under visibility accessor `name`.
    pub fn show(&self, name: &str, show: bool) -> Result<(), InstrumentError> {
        let group = *self
            .toggles
            .get(name)
            .ok_or_else(|| InstrumentError::UnknownAccessor(name.into()))?;
        let mut surface = self
            .surface
            .try_borrow_mut()
            .map_err(|_| InstrumentError::SurfaceBusy)?;
        if show {
            surface.remove_attribute(group, "display");
        } else {
            surface.set_attribute(group, "display", String::from("none"));
        }
        Ok(())
    }

    /// Returns the registers in index order.
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// Returns the root group of each gauge, in paint order.
    pub fn gauge_groups(&self) -> &[NodeId] {
        &self.gauges
    }

    /// Returns the setter names.
    pub fn setter_names(&self) -> impl Iterator<Item = &str> {
        self.setters.keys().map(String::as_str)
    }

    /// Borrows the drawing surface.
    pub fn surface(&self) -> Result<Ref<'_, S>, InstrumentError> {
        self.surface
            .try_borrow()
            .map_err(|_| InstrumentError::SurfaceBusy)
    }
}
