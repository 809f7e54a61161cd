//! Unity animation clip export.
//!
//! Writes a legacy `AnimationClip` asset (`.anim`, YAML 1.1). Clip-space x
//! drives `m_LocalPosition.x` and clip-space y drives `m_LocalPosition.z` of
//! the bound transform. Every key uses infinite tangents so the tracer steps
//! between samples instead of easing.
//!
//! # Output Format
//!
//! ```text
//! %YAML 1.1
//! %TAG !u! tag:unity3d.com,2011:
//! --- !u!74 &7400000
//! AnimationClip:
//!   m_Name: TraceClip
//!   ...
//!   m_PositionCurves:
//!   - curve:
//!       m_Curve:
//!       - serializedVersion: 3
//!         time: 0
//!         value: {x: -0.5, y: 0, z: 0.25}
//!   ...
//!   m_EditorCurves:
//!   - curve: ...     # m_LocalPosition.x
//!   - curve: ...     # m_LocalPosition.z
//! ```

use std::io::{self, Write};

use super::number::general;
use super::{ClipSettings, ClipWriter};
use crate::models::Keyframes;

/// Significant digits used for every number in the clip.
const PRECISION: usize = 6;

/// Writer for Unity `.anim` clips.
#[derive(Debug, Clone)]
pub struct AnimWriter {
    settings: ClipSettings,
}

impl AnimWriter {
    pub fn new(settings: ClipSettings) -> Self {
        Self { settings }
    }

    fn time(&self, index: usize) -> String {
        general(Keyframes::time_at(index, self.settings.sample_rate), PRECISION)
    }

    fn write_position_keys(&self, keyframes: &Keyframes, out: &mut dyn Write) -> io::Result<()> {
        for (index, p) in keyframes.points().iter().enumerate() {
            write!(
                out,
                "      - serializedVersion: 3\n\
                 \x20       time: {}\n\
                 \x20       value: {{x: {}, y: 0, z: {}}}\n\
                 \x20       inSlope: {{x: Infinity, y: 0, z: Infinity}}\n\
                 \x20       outSlope: {{x: Infinity, y: 0, z: Infinity}}\n\
                 \x20       tangentMode: 0\n\
                 \x20       weightedMode: 0\n\
                 \x20       inWeight: {{x: 0.33333334, y: 0.33333334, z: 0.33333334}}\n\
                 \x20       outWeight: {{x: 0.33333334, y: 0.33333334, z: 0.33333334}}\n",
                self.time(index),
                general(p.x, PRECISION),
                general(p.y, PRECISION),
            )?;
        }
        Ok(())
    }

    /// Write one editor curve animating `attribute`.
    fn write_editor_curve(
        &self,
        values: impl Iterator<Item = f64>,
        attribute: &str,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        out.write_all(b"  - curve:\n      serializedVersion: 2\n      m_Curve:\n")?;
        for (index, value) in values.enumerate() {
            write!(
                out,
                "      - serializedVersion: 3\n\
                 \x20       time: {}\n\
                 \x20       value: {}\n\
                 \x20       inSlope: Infinity\n\
                 \x20       outSlope: Infinity\n\
                 \x20       tangentMode: 103\n\
                 \x20       weightedMode: 0\n\
                 \x20       inWeight: 0.33333334\n\
                 \x20       outWeight: 0.33333334\n",
                self.time(index),
                general(value, PRECISION),
            )?;
        }
        write!(
            out,
            "      m_PreInfinity: 2\n\
             \x20     m_PostInfinity: 2\n\
             \x20     m_RotationOrder: 4\n\
             \x20   attribute: {}\n\
             \x20   path: {}\n\
             \x20   classID: 4\n\
             \x20   script: {{fileID: 0}}\n",
            attribute, self.settings.bone_path,
        )
    }
}

impl ClipWriter for AnimWriter {
    fn begin(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(
            out,
            "%YAML 1.1\n\
             %TAG !u! tag:unity3d.com,2011:\n\
             --- !u!74 &7400000\n\
             AnimationClip:\n\
             \x20 m_ObjectHideFlags: 0\n\
             \x20 m_CorrespondingSourceObject: {{fileID: 0}}\n\
             \x20 m_PrefabInstance: {{fileID: 0}}\n\
             \x20 m_PrefabAsset: {{fileID: 0}}\n\
             \x20 m_Name: {}\n\
             \x20 serializedVersion: 6\n\
             \x20 m_Legacy: 0\n\
             \x20 m_Compressed: 0\n\
             \x20 m_UseHighQualityCurve: 0\n\
             \x20 m_RotationCurves: []\n\
             \x20 m_CompressedRotationCurves: []\n\
             \x20 m_EulerCurves: []\n\
             \x20 m_PositionCurves:\n\
             \x20 - curve:\n\
             \x20     serializedVersion: 2\n\
             \x20     m_Curve:\n",
            self.settings.clip_name,
        )
    }

    fn finish(&self, keyframes: &Keyframes, out: &mut dyn Write) -> io::Result<()> {
        let s = &self.settings;
        self.write_position_keys(keyframes, out)?;

        write!(
            out,
            "      m_PreInfinity: 2\n\
             \x20     m_PostInfinity: 2\n\
             \x20     m_RotationOrder: 4\n\
             \x20   path: {bone}\n\
             \x20 m_ScaleCurves: []\n\
             \x20 m_FloatCurves: []\n\
             \x20 m_PPtrCurves: []\n\
             \x20 m_SampleRate: {rate}\n\
             \x20 m_WrapMode: 0\n\
             \x20 m_Bounds:\n\
             \x20   m_Center: {{x: 0, y: 0, z: 0}}\n\
             \x20   m_Extent: {{x: 0, y: 0, z: 0}}\n\
             \x20 m_ClipBindingConstant:\n\
             \x20   genericBindings:\n\
             \x20   - serializedVersion: 2\n\
             \x20     path: {hash}\n\
             \x20     attribute: 1\n\
             \x20     script: {{fileID: 0}}\n\
             \x20     typeID: 4\n\
             \x20     customType: 0\n\
             \x20     isPPtrCurve: 0\n\
             \x20   pptrCurveMapping: []\n\
             \x20 m_AnimationClipSettings:\n\
             \x20   serializedVersion: 2\n\
             \x20   m_AdditiveReferencePoseClip: {{fileID: 0}}\n\
             \x20   m_AdditiveReferencePoseTime: 0\n\
             \x20   m_StartTime: 0\n\
             \x20   m_StopTime: {stop}\n\
             \x20   m_OrientationOffsetY: 0\n\
             \x20   m_Level: 0\n\
             \x20   m_CycleOffset: 0\n\
             \x20   m_HasAdditiveReferencePose: 0\n\
             \x20   m_LoopTime: 1\n\
             \x20   m_LoopBlend: 0\n\
             \x20   m_LoopBlendOrientation: 0\n\
             \x20   m_LoopBlendPositionY: 0\n\
             \x20   m_LoopBlendPositionXZ: 0\n\
             \x20   m_KeepOriginalOrientation: 0\n\
             \x20   m_KeepOriginalPositionY: 1\n\
             \x20   m_KeepOriginalPositionXZ: 0\n\
             \x20   m_HeightFromFeet: 0\n\
             \x20   m_Mirror: 0\n\
             \x20 m_EditorCurves:\n",
            bone = s.bone_path,
            rate = s.sample_rate,
            hash = s.binding_hash,
            stop = general(keyframes.duration(s.sample_rate), PRECISION),
        )?;

        let points = keyframes.points();
        self.write_editor_curve(points.iter().map(|p| p.x), "m_LocalPosition.x", out)?;
        self.write_editor_curve(points.iter().map(|p| p.y), "m_LocalPosition.z", out)?;

        out.write_all(
            b"  m_EulerEditorCurves: []\n  m_HasGenericRootTransform: 0\n  m_HasMotionFloatCurves: 0\n  m_Events: []\n",
        )
    }

    fn format_name(&self) -> &'static str {
        "Unity animation clip"
    }
}
