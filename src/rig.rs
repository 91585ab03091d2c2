//! The application state driven once per frame.

use tracing::{debug, error, info, warn};

use crate::animation::{CameraPose, PathAnimator, PerspectiveCamera, Viewport};
use crate::config::RigConfig;
use crate::error::{ParameterError, Result};
use crate::geometry::{Spline, SplineKind};
use crate::input::{DeviceMapping, MidiAdapter, MidiBackend, RoutingTable};
use crate::math::Point3;
use crate::params::{Applied, ParamClass, ParamId, ParamValue, ParameterSurface, ShadingUniforms};
use crate::tessellation::{TessellateTube, TubeMesh};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub frame: u64,
    pub mesh: &'a TubeMesh,
    /// Uniform scale applied to the mesh.
    pub scale: f64,
    pub uniforms: &'a ShadingUniforms,
    /// Camera to render through.
    pub camera: &'a PerspectiveCamera,
    pub pose: &'a CameraPose,
    /// Path camera frustum and eye marker, when the helper is enabled.
    pub helper: Option<CameraHelper<'a>>,
}

/// Debug overlay showing where the path camera is.
#[derive(Debug, Clone, Copy)]
pub struct CameraHelper<'a> {
    pub camera: &'a PerspectiveCamera,
    pub eye: Point3,
}

/// The rendering backend.
pub trait RenderSurface {
    fn render(&mut self, view: &SceneView<'_>);
    fn resize(&mut self, viewport: Viewport);
}

/// Owns the parameters, the current spline and tube, the animator, both
/// cameras and the optional MIDI adapter.
pub struct Rig {
    params: ParameterSurface,
    spline_kind: SplineKind,
    spline: Spline,
    tube: TubeMesh,
    rebuilds: u64,
    rebuild_pending: bool,
    arc_divisions: usize,
    animator: PathAnimator,
    pose: CameraPose,
    path_camera: PerspectiveCamera,
    overview_camera: PerspectiveCamera,
    uniforms: ShadingUniforms,
    viewport: Viewport,
    midi: Option<MidiAdapter>,
    elapsed: f64,
    frame: u64,
}

impl Rig {
    /// Builds the rig with default parameters and the configured spline.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial tube cannot be tessellated.
    pub fn new(config: &RigConfig) -> Result<Self> {
        let mut params = ParameterSurface::new();
        params.set(ParamId::Spline, ParamValue::Spline(config.initial_spline))?;

        let spline_kind = params.spline();
        let spline = spline_kind.build_with(config.arc_length_divisions);
        let tube = TessellateTube::new(&spline, params.tube_params()).execute()?;

        let mut animator = PathAnimator::new(config.loop_period_secs, config.look_ahead_distance);
        animator.set_speed_factor(params.speed_factor());
        let pose = animator.pose(0.0, &spline, &tube, params.scale(), false);

        let aspect = config.viewport.aspect();
        let mut path_camera = PerspectiveCamera::path(aspect);
        path_camera.apply(&pose);

        info!(spline = %spline_kind, length = spline.length(), "rig ready");
        Ok(Self {
            uniforms: ShadingUniforms::from_surface(&params),
            params,
            spline_kind,
            spline,
            tube,
            rebuilds: 1,
            rebuild_pending: false,
            arc_divisions: config.arc_length_divisions,
            animator,
            pose,
            path_camera,
            overview_camera: PerspectiveCamera::overview(aspect),
            viewport: config.viewport,
            midi: None,
            elapsed: 0.0,
            frame: 0,
        })
    }

    /// Loads the device mapping and starts acquiring the MIDI device.
    ///
    /// A missing or unreadable mapping leaves MIDI input off; the rig keeps
    /// running either way.
    pub fn connect_midi(&mut self, config: &RigConfig, backend: Box<dyn MidiBackend>) {
        let Some(path) = &config.mapping_path else {
            info!("no device mapping configured, MIDI input off");
            return;
        };
        match DeviceMapping::load(path) {
            Ok(mapping) => {
                let routes = RoutingTable::from_mapping(&mapping);
                self.attach_midi(MidiAdapter::new(routes, backend, &config.preferred_device));
            }
            Err(err) => error!(%err, "device mapping unavailable, MIDI input off"),
        }
    }

    pub fn attach_midi(&mut self, adapter: MidiAdapter) {
        self.midi = Some(adapter);
    }

    /// Writes a parameter, exactly as the panel would.
    ///
    /// Geometry writes schedule a tube rebuild for the next tick; shading and
    /// camera writes take effect immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the value has the wrong kind or is not
    /// finite. The surface is left untouched in that case.
    pub fn set_parameter(
        &mut self,
        id: ParamId,
        value: ParamValue,
    ) -> std::result::Result<Applied, ParameterError> {
        let applied = self.params.set(id, value)?;
        if applied.changed {
            match applied.class {
                ParamClass::Geometry => self.rebuild_pending = true,
                ParamClass::Transform => {}
                ParamClass::Shading => self.uniforms.refresh(&self.params),
                ParamClass::Camera => self.animator.set_speed_factor(self.params.speed_factor()),
            }
        }
        Ok(applied)
    }

    /// Runs one frame: applies queued MIDI input, rebuilds the tube if a
    /// geometry parameter changed, advances the camera and renders.
    pub fn tick(&mut self, dt: f64, surface: &mut dyn RenderSurface) -> &CameraPose {
        self.apply_midi();
        self.rebuild_if_pending();

        let t = self.animator.advance(dt);
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.uniforms.time = self.elapsed;

        self.pose = self.animator.pose(
            t,
            &self.spline,
            &self.tube,
            self.params.scale(),
            self.params.toggle(ParamId::LookAhead),
        );
        self.path_camera.apply(&self.pose);

        let camera = if self.params.toggle(ParamId::AnimationView) {
            &self.path_camera
        } else {
            &self.overview_camera
        };
        let helper = self
            .params
            .toggle(ParamId::CameraHelper)
            .then_some(CameraHelper {
                camera: &self.path_camera,
                eye: self.pose.position,
            });

        surface.render(&SceneView {
            frame: self.frame,
            mesh: &self.tube,
            scale: self.params.scale(),
            uniforms: &self.uniforms,
            camera,
            pose: &self.pose,
            helper,
        });
        self.frame += 1;
        &self.pose
    }

    /// Updates both cameras and the surface to a new output size.
    pub fn resize(&mut self, viewport: Viewport, surface: &mut dyn RenderSurface) {
        self.viewport = viewport;
        let aspect = viewport.aspect();
        self.path_camera.aspect = aspect;
        self.overview_camera.aspect = aspect;
        surface.resize(viewport);
    }

    fn apply_midi(&mut self) {
        let Some(midi) = self.midi.as_mut() else {
            return;
        };
        for write in midi.poll() {
            if let Err(err) = self.set_parameter(write.id, write.value) {
                warn!(%err, "MIDI write rejected");
            }
        }
    }

    fn rebuild_if_pending(&mut self) {
        if !self.rebuild_pending {
            return;
        }
        self.rebuild_pending = false;

        let kind = self.params.spline();
        let fresh_spline = (kind != self.spline_kind).then(|| kind.build_with(self.arc_divisions));
        let spline = fresh_spline.as_ref().unwrap_or(&self.spline);

        let built = TessellateTube::new(spline, self.params.tube_params()).execute();
        match built {
            Ok(tube) => {
                if let Some(spline) = fresh_spline {
                    self.spline = spline;
                    self.spline_kind = kind;
                }
                self.tube = tube;
                self.rebuilds += 1;
                debug!(rebuilds = self.rebuilds, spline = %kind, "tube replaced");
            }
            Err(err) => error!(%err, "tube rebuild failed, keeping previous mesh"),
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterSurface {
        &self.params
    }

    #[must_use]
    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    #[must_use]
    pub fn tube(&self) -> &TubeMesh {
        &self.tube
    }

    /// Number of tubes built so far, the initial one included.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Whether a geometry write is waiting for the next tick.
    #[must_use]
    pub fn rebuild_pending(&self) -> bool {
        self.rebuild_pending
    }

    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    #[must_use]
    pub fn path_camera(&self) -> &PerspectiveCamera {
        &self.path_camera
    }

    #[must_use]
    pub fn overview_camera(&self) -> &PerspectiveCamera {
        &self.overview_camera
    }

    #[must_use]
    pub fn uniforms(&self) -> &ShadingUniforms {
        &self.uniforms
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn midi(&self) -> Option<&MidiAdapter> {
        self.midi.as_ref()
    }

    /// Mutable access for waiting on device acquisition.
    pub fn midi_mut(&mut self) -> Option<&mut MidiAdapter> {
        self.midi.as_mut()
    }

    /// Seconds of animation time elapsed.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
