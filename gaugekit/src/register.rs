// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded numeric cells with change notification.
//!
//! A [`Register`] holds one live input (airspeed, altitude, roll, ...). Setting it clamps the
//! value into its bounds and synchronously notifies every listener in registration order.
//! Registers are cheap handles: clones share the same cell, which is how one register drives
//! several gauges.

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use thiserror::Error;

/// A value conversion applied on the way into or out of a register.
pub type Conversion = Rc<dyn Fn(f64) -> f64>;

/// A change listener. Returning an error logs it; the remaining listeners still run.
pub type Listener = Box<dyn FnMut(f64) -> Result<(), ListenerError>>;

/// Failure reported by a register listener.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ListenerError {
    /// The drawing surface was already borrowed when the listener tried to update it.
    #[error("drawing surface is already borrowed")]
    SurfaceBusy,
    /// Any other listener failure.
    #[error("{0}")]
    Other(String),
}

/// Configuration for one register.
#[derive(Clone)]
pub struct RegisterSpec {
    /// Optional register name, usable as a gauge register reference.
    pub name: Option<String>,
    /// Lower bound.
    pub min_value: f64,
    /// Upper bound.
    pub max_value: f64,
    /// Initial value; defaults to `min_value`.
    pub value: Option<f64>,
    /// Name of the instrument setter for this register.
    pub set_name: String,
    /// Name of the instrument getter for this register.
    pub get_name: String,
    /// Conversion applied to raw input before clamping.
    pub input_conversion: Option<Conversion>,
    /// Conversion applied by [`Register::get_value`].
    pub output_conversion: Option<Conversion>,
}

impl core::fmt::Debug for RegisterSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterSpec")
            .field("name", &self.name)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("value", &self.value)
            .field("set_name", &self.set_name)
            .field("get_name", &self.get_name)
            .field("input_conversion", &self.input_conversion.is_some())
            .field("output_conversion", &self.output_conversion.is_some())
            .finish()
    }
}

impl Default for RegisterSpec {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl RegisterSpec {
    /// Creates a register spec with the given bounds and the default accessor names
    /// (`setValue` / `getValue`).
    pub fn new(min_value: f64, max_value: f64) -> Self {
        Self {
            name: None,
            min_value,
            max_value,
            value: None,
            set_name: String::from("setValue"),
            get_name: String::from("getValue"),
            input_conversion: None,
            output_conversion: None,
        }
    }

    /// Sets the register name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the initial value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the accessor names used by the instrument.
    pub fn with_accessors(
        mut self,
        set_name: impl Into<String>,
        get_name: impl Into<String>,
    ) -> Self {
        self.set_name = set_name.into();
        self.get_name = get_name.into();
        self
    }

    /// Sets the input conversion.
    pub fn with_input_conversion(mut self, f: impl Fn(f64) -> f64 + 'static) -> Self {
        self.input_conversion = Some(Rc::new(f));
        self
    }

    /// Sets the output conversion.
    pub fn with_output_conversion(mut self, f: impl Fn(f64) -> f64 + 'static) -> Self {
        self.output_conversion = Some(Rc::new(f));
        self
    }

    /// Returns the configured initial value.
    pub fn initial_value(&self) -> f64 {
        self.value.unwrap_or(self.min_value)
    }

    /// Returns `true` if the bounds are finite and ordered.
    pub fn has_valid_bounds(&self) -> bool {
        self.min_value.is_finite() && self.max_value.is_finite() && self.min_value <= self.max_value
    }

    /// Creates the live register. Bounds are expected to be valid (see
    /// [`RegisterSpec::has_valid_bounds`]); reversed bounds are swapped.
    pub fn instantiate(&self) -> Register {
        let register = Register::with_parts(
            self.name.clone(),
            self.min_value,
            self.max_value,
            self.input_conversion.clone(),
            self.output_conversion.clone(),
        );
        let initial = self.initial_value();
        if !initial.is_nan() {
            register.inner.value.set(register.clamp(initial));
        }
        register
    }
}

struct RegisterInner {
    name: Option<String>,
    min: f64,
    max: f64,
    value: Cell<f64>,
    initialized: Cell<bool>,
    input: Option<Conversion>,
    output: Option<Conversion>,
    listeners: RefCell<Vec<Listener>>,
}

/// A shared, bounded numeric cell.
#[derive(Clone)]
pub struct Register {
    inner: Rc<RegisterInner>,
}

impl core::fmt::Debug for Register {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Register")
            .field("name", &self.inner.name)
            .field("min", &self.inner.min)
            .field("max", &self.inner.max)
            .field("value", &self.inner.value.get())
            .field("initialized", &self.inner.initialized.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Register {
    /// Creates an unnamed register over `[min, max]` holding `min`.
    pub fn new(min: f64, max: f64) -> Self {
        Self::with_parts(None, min, max, None, None)
    }

    fn with_parts(
        name: Option<String>,
        min: f64,
        max: f64,
        input: Option<Conversion>,
        output: Option<Conversion>,
    ) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            inner: Rc::new(RegisterInner {
                name,
                min,
                max,
                value: Cell::new(min),
                initialized: Cell::new(false),
                input,
                output,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Returns the register name, if configured.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Lower bound.
    pub fn min_value(&self) -> f64 {
        self.inner.min
    }

    /// Upper bound.
    pub fn max_value(&self) -> f64 {
        self.inner.max
    }

    /// Returns `true` once the register has been set at least once.
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    /// Returns the stored value without applying the output conversion.
    pub fn raw_value(&self) -> f64 {
        self.inner.value.get()
    }

    /// Returns the current value, passed through the output conversion.
    pub fn get_value(&self) -> f64 {
        let v = self.inner.value.get();
        match &self.inner.output {
            Some(f) => f(v),
            None => v,
        }
    }

    /// Converts, clamps and stores `raw`, notifying listeners on the first call or on change.
    ///
    /// Returns the stored value. A NaN input (before or after conversion) is ignored and the
    /// current value is returned unchanged, as is a write made from inside one of this
    /// register's own listeners.
    pub fn set_value(&self, raw: f64) -> f64 {
        let converted = match &self.inner.input {
            Some(f) => f(raw),
            None => raw,
        };
        if converted.is_nan() {
            log::warn!(
                "register {}: ignoring NaN input",
                self.name().unwrap_or("<unnamed>")
            );
            return self.inner.value.get();
        }
        let value = self.clamp(converted);
        if self.inner.initialized.get() && value == self.inner.value.get() {
            return value;
        }
        // The stored value is always the last one dispatched.
        let Ok(mut listeners) = self.inner.listeners.try_borrow_mut() else {
            log::error!(
                "register {}: set_value called from one of its own listeners, ignoring {value}",
                self.name().unwrap_or("<unnamed>")
            );
            return self.inner.value.get();
        };
        self.inner.value.set(value);
        self.inner.initialized.set(true);
        self.notify(&mut listeners[..], value);
        value
    }

    /// Appends a listener. Listeners live as long as the register.
    pub fn add_listener(&self, listener: impl FnMut(f64) -> Result<(), ListenerError> + 'static) {
        match self.inner.listeners.try_borrow_mut() {
            Ok(mut listeners) => listeners.push(Box::new(listener)),
            Err(_) => log::error!(
                "register {}: cannot add a listener while notifying",
                self.name().unwrap_or("<unnamed>")
            ),
        }
    }

    /// Returns the number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .try_borrow()
            .map(|l| l.len())
            .unwrap_or_default()
    }

    fn clamp(&self, value: f64) -> f64 {
        if value < self.inner.min {
            self.inner.min
        } else if value > self.inner.max {
            self.inner.max
        } else {
            value
        }
    }

    fn notify(&self, listeners: &mut [Listener], value: f64) {
        let name = self.name().unwrap_or("<unnamed>");
        log::trace!("register {name}: notifying {} listeners of {value}", listeners.len());
        for (index, listener) in listeners.iter_mut().enumerate() {
            if let Err(err) = listener(value) {
                log::error!("register {name}: listener {index} failed: {err}");
            }
        }
    }
}
