//! Reductions, block integration and well indices over an ensemble.

use ndarray::{
    s, Array1, Array2, Array4, Array5, ArrayView1, ArrayView3, ArrayView4, Axis, Ix4, Zip,
};
use nearwell_extract::{member_well_index, WiError};
use nearwell_geometry::{equivalent_radius, integrate_fine_scale_value, RadialGrid};
use tracing::debug;

use crate::config::UpscaleConfig;
use crate::error::UpscaleError;
use crate::fluid::{FluidProperties, Phase, RelativePermeability};
use crate::formulas;

/// Upscales features of a layered radial ensemble.
///
/// Feature tensors are passed flat as `(members, steps, cells, features)`
/// and reshaped internally to
/// `(members, steps, layers, zcells per layer, xcells)` for one feature.
/// All per-layer outputs have shape `(members, steps, layers, n)` where `n`
/// is the number of radial cells, radii, or blocks.
#[derive(Clone, Debug)]
pub struct Upscaler {
    config: UpscaleConfig,
    grid: RadialGrid,
}

impl Upscaler {
    /// Validate `config` and check `grid` has one ring per x-cell.
    pub fn new(config: UpscaleConfig, grid: RadialGrid) -> Result<Self, UpscaleError> {
        config.validate()?;
        if grid.num_cells() != config.num_xcells {
            return Err(UpscaleError::GridMismatch {
                cells: grid.num_cells(),
                xcells: config.num_xcells,
            });
        }
        debug!(
            members = config.num_members,
            layers = config.num_layers,
            xcells = config.num_xcells,
            blocks = config.block_sidelengths.len(),
            "upscaler ready"
        );
        Ok(Self { config, grid })
    }

    /// The configuration.
    pub fn config(&self) -> &UpscaleConfig {
        &self.config
    }

    /// The radial grid.
    pub fn grid(&self) -> &RadialGrid {
        &self.grid
    }

    fn layered(
        &self,
        features: ArrayView4<'_, f64>,
        index: usize,
    ) -> Result<Array5<f64>, UpscaleError> {
        let c = &self.config;
        let (members, steps, cells, nfeatures) = features.dim();
        if (members, steps, cells) != (c.num_members, c.num_timesteps, c.num_cells()) {
            return Err(UpscaleError::ShapeMismatch {
                what: "features",
                expected: vec![c.num_members, c.num_timesteps, c.num_cells(), nfeatures],
                actual: features.shape().to_vec(),
            });
        }
        if index >= nfeatures {
            return Err(UpscaleError::FeatureIndex {
                index,
                features: nfeatures,
            });
        }
        features
            .index_axis(Axis(3), index)
            .to_owned()
            .into_shape_with_order((
                members,
                steps,
                c.num_layers,
                c.zcells_per_layer(),
                c.num_xcells,
            ))
            .map_err(|_| UpscaleError::ShapeMismatch {
                what: "features",
                expected: vec![c.num_members, c.num_timesteps, c.num_cells(), nfeatures],
                actual: features.shape().to_vec(),
            })
    }

    /// Mean of feature `index` over the z-cells of each layer.
    pub fn vertically_averaged_values(
        &self,
        features: ArrayView4<'_, f64>,
        index: usize,
    ) -> Result<Array4<f64>, UpscaleError> {
        self.layered(features, index)?
            .mean_axis(Axis(3))
            .ok_or(UpscaleError::ZeroDimension {
                which: "num_zcells",
            })
    }

    /// Feature `index` in the top z-cell of each layer, for properties that
    /// are constant within a layer.
    pub fn homogeneous_values(
        &self,
        features: ArrayView4<'_, f64>,
        index: usize,
    ) -> Result<Array4<f64>, UpscaleError> {
        Ok(self
            .layered(features, index)?
            .index_axis(Axis(3), 0)
            .to_owned())
    }

    /// Block average of the vertically averaged feature `index` for each
    /// configured block side length: the ring-weighted integral over the
    /// square divided by its area.
    pub fn horizontally_integrated_values(
        &self,
        features: ArrayView4<'_, f64>,
        index: usize,
    ) -> Result<Array4<f64>, UpscaleError> {
        let averaged = self.vertically_averaged_values(features, index)?;
        let blocks = &self.config.block_sidelengths;
        let mut integrated = integrate_fine_scale_value(
            averaged.view().into_dyn(),
            self.grid.boundary_radii(),
            blocks,
            3,
        )?;
        for (b, &s) in blocks.iter().enumerate() {
            integrated
                .index_axis_mut(Axis(3), b)
                .mapv_inplace(|v| v / (s * s));
        }
        let shape = integrated.shape().to_vec();
        integrated
            .into_dimensionality::<Ix4>()
            .map_err(|_| UpscaleError::ShapeMismatch {
                what: "integrated values",
                expected: vec![
                    self.config.num_members,
                    self.config.num_timesteps,
                    self.config.num_layers,
                    blocks.len(),
                ],
                actual: shape,
            })
    }

    /// Peaceman equivalent radius of each configured block.
    pub fn block_equivalent_radii(&self) -> Array1<f64> {
        self.config
            .block_sidelengths
            .iter()
            .map(|&s| equivalent_radius(s))
            .collect()
    }

    /// Productivity index `2π·kh / ln(r/r_w)` per layer and radius.
    ///
    /// `perm_thickness` has shape `(members, steps, layers)`.
    pub fn analytical_pi(
        &self,
        perm_thickness: ArrayView3<'_, f64>,
        radii: ArrayView1<'_, f64>,
    ) -> Result<Array4<f64>, UpscaleError> {
        let unit = radii
            .iter()
            .map(|&r| formulas::peaceman_wi(1.0, r, self.config.well_radius))
            .collect::<Result<Array1<f64>, _>>()?;
        let (members, steps, layers) = perm_thickness.dim();
        let mut pi = Array4::zeros((members, steps, layers, radii.len()));
        Zip::from(pi.lanes_mut(Axis(3)))
            .and(&perm_thickness)
            .for_each(|mut lane, &kh| lane.assign(&(&unit * kh)));
        Ok(pi)
    }

    /// Two-phase analytical well index `PI · Σ ρ·kr/μ`.
    ///
    /// All inputs share the shape of `pi`. Phase properties are evaluated
    /// at each entry's pressure and temperature; `saturations` are gas
    /// saturations.
    pub fn analytical_wi(
        &self,
        pi: ArrayView4<'_, f64>,
        pressures: ArrayView4<'_, f64>,
        temperatures: ArrayView4<'_, f64>,
        saturations: ArrayView4<'_, f64>,
        fluid: &dyn FluidProperties,
        relperm: &dyn RelativePermeability,
    ) -> Result<Array4<f64>, UpscaleError> {
        for (what, array) in [
            ("pressures", &pressures.view()),
            ("temperatures", &temperatures.view()),
            ("saturations", &saturations.view()),
        ] {
            if array.shape() != pi.shape() {
                return Err(UpscaleError::ShapeMismatch {
                    what,
                    expected: pi.shape().to_vec(),
                    actual: array.shape().to_vec(),
                });
            }
        }
        Ok(Zip::from(&pi)
            .and(&pressures)
            .and(&temperatures)
            .and(&saturations)
            .map_collect(|&pi, &p, &t, &s_gas| {
                let mobility: f64 = Phase::ALL
                    .iter()
                    .map(|&phase| fluid.properties(p, t, phase).mobility(relperm.kr(s_gas, phase)))
                    .sum();
                pi * mobility
            }))
    }

    /// Data-driven well index per layer, scaled from the sector to the full
    /// circle.
    ///
    /// `bhp` and `injection_rates` have shape `(members, steps, zcells)`;
    /// the bottom-hole pressure is averaged and the rate summed over each
    /// layer. `block_pressures` has shape `(members, steps, layers, n)`.
    /// Each entry is `(2π/angle) · q_layer / (p_well - p_block)`.
    ///
    /// # Errors
    ///
    /// The first entry whose well index is not finite rejects the whole
    /// computation: [`UpscaleError::ZeroPressureDifference`] when well and
    /// block pressure are equal, [`UpscaleError::NonFiniteWellIndex`] when
    /// a rate or pressure is NaN or infinite.
    pub fn data_wi(
        &self,
        bhp: ArrayView3<'_, f64>,
        block_pressures: ArrayView4<'_, f64>,
        injection_rates: ArrayView3<'_, f64>,
    ) -> Result<Array4<f64>, UpscaleError> {
        let c = &self.config;
        let per_zcell = [c.num_members, c.num_timesteps, c.num_zcells];
        for (what, array) in [("bhp", &bhp.view()), ("injection_rates", &injection_rates.view())] {
            if array.shape() != per_zcell {
                return Err(UpscaleError::ShapeMismatch {
                    what,
                    expected: per_zcell.to_vec(),
                    actual: array.shape().to_vec(),
                });
            }
        }
        let n = block_pressures.len_of(Axis(3));
        if block_pressures.shape()[..3] != [c.num_members, c.num_timesteps, c.num_layers] || n == 0
        {
            return Err(UpscaleError::ShapeMismatch {
                what: "block_pressures",
                expected: vec![c.num_members, c.num_timesteps, c.num_layers, n.max(1)],
                actual: block_pressures.shape().to_vec(),
            });
        }

        let per_layer = (c.num_members, c.num_timesteps, c.num_layers, c.zcells_per_layer());
        let layer_shape_error = |what| UpscaleError::ShapeMismatch {
            what,
            expected: per_zcell.to_vec(),
            actual: per_zcell.to_vec(),
        };
        let well_pressure = bhp
            .to_owned()
            .into_shape_with_order(per_layer)
            .map_err(|_| layer_shape_error("bhp"))?
            .mean_axis(Axis(3))
            .ok_or(UpscaleError::ZeroDimension {
                which: "num_zcells",
            })?;
        let layer_rates = injection_rates
            .to_owned()
            .into_shape_with_order(per_layer)
            .map_err(|_| layer_shape_error("injection_rates"))?
            .sum_axis(Axis(3));

        let factor = c.full_circle_factor();
        let mut wi = Array4::zeros((c.num_members, c.num_timesteps, c.num_layers, n));
        for member in 0..c.num_members {
            for layer in 0..c.num_layers {
                let mut pressures = Array2::zeros((c.num_timesteps, n + 1));
                pressures
                    .column_mut(0)
                    .assign(&well_pressure.slice(s![member, .., layer]));
                pressures
                    .slice_mut(s![.., 1..])
                    .assign(&block_pressures.slice(s![member, .., layer, ..]));
                let layer_wi = member_well_index(
                    pressures.view(),
                    layer_rates.slice(s![member, .., layer]),
                )
                .map_err(|e| match e {
                    WiError::NonFinite { step, cell }
                        if pressures[[step, 0]] == pressures[[step, cell]] =>
                    {
                        UpscaleError::ZeroPressureDifference {
                            member,
                            step,
                            layer,
                            cell: cell - 1,
                        }
                    }
                    WiError::NonFinite { step, cell } => UpscaleError::NonFiniteWellIndex {
                        member,
                        step,
                        layer,
                        cell: cell - 1,
                    },
                    other => UpscaleError::WellIndex(other),
                })?;
                wi.slice_mut(s![member, .., layer, ..])
                    .assign(&(layer_wi * factor));
            }
        }
        debug!(members = c.num_members, layers = c.num_layers, "data well index computed");
        Ok(wi)
    }
}
